//! Operation Orchestrator.
//!
//! Composes credential collection, transform invocation, progress
//! reporting, and outcome handling into one operation lifecycle:
//! collect → invoke (with the progress driver observing) → handle.
//! One operation runs at a time; the caller blocks until this returns.

use anyhow::{Result, bail};

use crate::credential::Collector;
use crate::error::InputError;
use crate::file::validation::{is_archive_file, is_cipher_file};
use crate::logging::OpLog;
use crate::progress::{self, ProgressEvent};
use crate::tool::Invoker;
use crate::types::{LockMethod, Operation, OperationRequest, RunStatus, TransformKind};

pub struct Orchestrator<'a> {
    invoker: Invoker,
    log: &'a OpLog,
    interactive: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(invoker: Invoker, log: &'a OpLog, interactive: bool) -> Self {
        Self { invoker, log, interactive }
    }

    /// Runs one operation from credential collection to final outcome.
    ///
    /// A dismissed credential prompt returns `Cancelled` without invoking
    /// anything. Validation and credential failures surface as errors and
    /// are never recorded as transform failures, since no transform ran.
    pub fn run(&self, request: &OperationRequest) -> Result<RunStatus> {
        let kind = transform_kind(request)?;

        tracing::debug!(operation = %request.operation, kind = kind.name(), "operation selected");

        let Some(secret) = Collector::collect(request.operation.requires_confirmation())? else {
            tracing::debug!("credential prompt dismissed");
            return Ok(RunStatus::Cancelled);
        };

        let label = request.operation.progress_label();
        let result = progress::drive(label, |events| {
            let _ = events.send(ProgressEvent::new(10, "Starting"));
            let _ = events.send(ProgressEvent::new(55, label));
            self.invoker.invoke(kind, &request.input, &secret, request.payload.as_ref())
        })?;

        crate::outcome::OutcomeHandler::new(self.log, self.interactive).handle(result, request)
    }
}

/// Maps a request to the external transformation it needs.
///
/// Unlock infers the method from the input's naming convention; a file we
/// did not produce is rejected here, before any credential is collected.
pub fn transform_kind(request: &OperationRequest) -> Result<TransformKind> {
    match request.operation {
        Operation::Lock => match request.method {
            Some(LockMethod::StrongCipher) => Ok(TransformKind::EncryptStrong),
            Some(LockMethod::SimpleArchive) => Ok(TransformKind::EncryptArchive),
            None => bail!("lock operation requires a protection method"),
        },
        Operation::Unlock => {
            if is_cipher_file(&request.input) {
                Ok(TransformKind::DecryptStrong)
            } else if is_archive_file(&request.input) {
                Ok(TransformKind::DecryptArchive)
            } else {
                Err(InputError::InvalidInputFormat {
                    path: request.input.clone(),
                    expected: "encrypted or archive",
                }
                .into())
            }
        }
        Operation::HideData => Ok(TransformKind::EmbedPayload),
        Operation::ExtractData => Ok(TransformKind::ExtractPayload),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_lock_maps_through_the_method() {
        let strong = OperationRequest::new(Operation::Lock, "a.txt").with_method(LockMethod::StrongCipher);
        assert_eq!(transform_kind(&strong).unwrap(), TransformKind::EncryptStrong);

        let archive = OperationRequest::new(Operation::Lock, "a.txt").with_method(LockMethod::SimpleArchive);
        assert_eq!(transform_kind(&archive).unwrap(), TransformKind::EncryptArchive);
    }

    #[test]
    fn test_unlock_infers_from_naming_convention() {
        let cipher = OperationRequest::new(Operation::Unlock, "a.txt.gpg");
        assert_eq!(transform_kind(&cipher).unwrap(), TransformKind::DecryptStrong);

        let archive = OperationRequest::new(Operation::Unlock, "a.7z");
        assert_eq!(transform_kind(&archive).unwrap(), TransformKind::DecryptArchive);
    }

    #[test]
    fn test_unlock_rejects_unrecognized_files() {
        let request = OperationRequest::new(Operation::Unlock, "report.txt");
        let err = transform_kind(&request).unwrap_err();
        let input_err = err.downcast_ref::<InputError>().unwrap();
        assert_eq!(
            *input_err,
            InputError::InvalidInputFormat { path: PathBuf::from("report.txt"), expected: "encrypted or archive" }
        );
    }

    #[test]
    fn test_lock_without_method_is_a_caller_bug() {
        let request = OperationRequest::new(Operation::Lock, "a.txt");
        assert!(transform_kind(&request).is_err());
    }
}
