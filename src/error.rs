//! Error taxonomies for pre-execution failures.
//!
//! These errors abort an operation before any external process is spawned.
//! They are reported to the user immediately and are never recorded as
//! transform failures in the operation log, since no transform ran.

use std::path::PathBuf;

use thiserror::Error;

/// Input validation failures, detected before the external tool is invoked.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The target does not exist.
    #[error("file not found: {}", .0.display())]
    Missing(PathBuf),

    /// The target exists but is not a regular file.
    #[error("not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    /// The target does not carry the naming convention the unlock path
    /// requires (`.gpg` for the strong cipher, `.7z` for archives).
    #[error("{}: not a recognized {} file", path.display(), expected)]
    InvalidInputFormat {
        path: PathBuf,
        expected: &'static str,
    },

    /// The carrier is not one of the supported image formats.
    #[error("unsupported media type: {} (supported: jpg, jpeg, bmp, wav, au)", .0.display())]
    UnsupportedMediaType(PathBuf),

    /// A hide operation needs exactly one payload source.
    #[error("exactly one of a payload file or an inline message is required")]
    AmbiguousPayload,
}

/// Credential validation failures.
///
/// These abort the operation before any transform is attempted. A dismissed
/// prompt is *not* an error; the collector models it as a silent no-op.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    /// The secret was empty or whitespace-only.
    #[error("password must not be empty")]
    Empty,

    /// The confirmation entry did not match the secret.
    #[error("passwords do not match")]
    Mismatch,
}
