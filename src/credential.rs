//! Credential collection and validation.
//!
//! Obtains a password from the user with masked input, optionally with a
//! confirmation entry for operations that create a protected artifact.
//! Dismissing the prompt is a silent no-op, not an error.

use anyhow::{Result, anyhow};
use inquire::{InquireError, Password, PasswordDisplayMode};

use crate::error::CredentialError;
use crate::secret::Secret;

/// Validates a collected secret against the creation/consumption rules.
///
/// Validation order is fixed: an empty secret is reported before a
/// confirmation mismatch. `confirmation` is `None` for consumption
/// operations, which only require a non-empty secret.
pub fn validate(secret: &str, confirmation: Option<&str>) -> Result<(), CredentialError> {
    if secret.trim().is_empty() {
        return Err(CredentialError::Empty);
    }

    if let Some(confirmation) = confirmation {
        if secret != confirmation {
            return Err(CredentialError::Mismatch);
        }
    }

    Ok(())
}

/// Interactive credential collector.
///
/// Creation operations (lock, hide) require the password twice to catch
/// typos before anything irreversible happens; consumption operations
/// (unlock, extract) prompt once, since a wrong password surfaces as a
/// tool failure instead.
pub struct Collector;

impl Collector {
    /// Prompts for a password, with a confirmation entry when requested.
    ///
    /// Returns `Ok(None)` when the user dismisses the prompt; callers must
    /// treat that as a cancelled operation, not a failure. Validation
    /// failures (empty secret, mismatched confirmation) are reported as
    /// errors and abort the operation before any transform is attempted.
    pub fn collect(require_confirmation: bool) -> Result<Option<Secret>> {
        let Some(password) = Self::prompt("Enter password")? else {
            return Ok(None);
        };

        let confirmation = if require_confirmation {
            match Self::prompt("Confirm password")? {
                Some(entry) => Some(entry),
                None => return Ok(None),
            }
        } else {
            None
        };

        validate(&password, confirmation.as_deref())?;

        Ok(Some(Secret::from_string(password)))
    }

    /// Single masked prompt. `Ok(None)` means the user pressed Esc.
    fn prompt(message: &str) -> Result<Option<String>> {
        let entry = Password::new(message)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt();

        match entry {
            Ok(value) => Ok(Some(value)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(anyhow!("password input failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_confirmation_succeeds() {
        assert!(validate("Sw0rdfish!", Some("Sw0rdfish!")).is_ok());
    }

    #[test]
    fn test_mismatch_is_rejected() {
        assert_eq!(validate("abc", Some("abd")), Err(CredentialError::Mismatch));
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(validate("", Some("")), Err(CredentialError::Empty));
        assert_eq!(validate("", None), Err(CredentialError::Empty));
    }

    #[test]
    fn test_empty_reported_before_mismatch() {
        // An empty secret with a non-empty confirmation is an emptiness
        // failure, not a mismatch.
        assert_eq!(validate("", Some("abc")), Err(CredentialError::Empty));
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        assert_eq!(validate("   ", None), Err(CredentialError::Empty));
    }

    #[test]
    fn test_consumption_needs_no_confirmation() {
        assert!(validate("hunter2", None).is_ok());
    }
}
