//! Common type definitions for VeilBox.
//!
//! Provides the core enums and structures shared across the orchestrator,
//! invoker, and UI layers.
//!
//! # Overview
//!
//! - [`Operation`]: the user-requested action (lock, unlock, hide, extract)
//! - [`LockMethod`]: which protection a lock operation uses
//! - [`TransformKind`]: the concrete external transformation to invoke
//! - [`OperationRequest`]: one fully-specified operation instance
//! - [`TransformResult`]: exit status, output path, and captured diagnostics
//! - [`RunStatus`]: how a single orchestration pass ended

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter};

/// One user-requested action, from request to final outcome.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum Operation {
    /// Protect a file with encryption or archiving, producing a new artifact.
    #[strum(serialize = "Lock")]
    Lock,

    /// Reverse a previous lock, restoring the original content.
    #[strum(serialize = "Unlock")]
    Unlock,

    /// Conceal a payload (file or inline text) inside an image.
    #[strum(serialize = "Hide data")]
    HideData,

    /// Recover a payload previously concealed inside an image.
    #[strum(serialize = "Extract data")]
    ExtractData,
}

impl Operation {
    /// Whether this operation creates a protected artifact and therefore
    /// requires the credential to be entered twice.
    #[inline]
    pub fn requires_confirmation(self) -> bool {
        matches!(self, Self::Lock | Self::HideData)
    }

    /// Progress label shown while the transform runs.
    #[inline]
    pub fn progress_label(self) -> &'static str {
        match self {
            Self::Lock => "Locking",
            Self::Unlock => "Unlocking",
            Self::HideData => "Embedding",
            Self::ExtractData => "Extracting",
        }
    }
}

/// Protection method for a lock operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum LockMethod {
    /// Symmetric encryption via the strong-cipher tool.
    #[strum(serialize = "Strong cipher (gpg)")]
    StrongCipher,

    /// Password-protected archive via the archiver.
    #[strum(serialize = "Simple archive (7z)")]
    SimpleArchive,
}

/// The concrete external transformation to run.
///
/// Matched exhaustively everywhere; adding a variant forces a
/// compiler-checked update at every dispatch site.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransformKind {
    EncryptStrong,
    DecryptStrong,
    EncryptArchive,
    DecryptArchive,
    EmbedPayload,
    ExtractPayload,
}

impl TransformKind {
    /// Short name for log entries and traces.
    pub fn name(self) -> &'static str {
        match self {
            Self::EncryptStrong => "encrypt-strong",
            Self::DecryptStrong => "decrypt-strong",
            Self::EncryptArchive => "encrypt-archive",
            Self::DecryptArchive => "decrypt-archive",
            Self::EmbedPayload => "embed-payload",
            Self::ExtractPayload => "extract-payload",
        }
    }
}

/// What gets hidden inside the carrier image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// An existing file on disk.
    File(PathBuf),

    /// Inline text, staged to a transient carrier file just before embedding.
    Inline(String),
}

/// One fully-specified operation instance.
///
/// Constructed fresh per user request and consumed within a single
/// orchestration pass; nothing here outlives the operation.
#[derive(Clone, Debug)]
pub struct OperationRequest {
    /// The requested action.
    pub operation: Operation,

    /// The target file.
    pub input: PathBuf,

    /// Protection method, present for lock operations only.
    pub method: Option<LockMethod>,

    /// Payload to conceal, present for hide operations only.
    pub payload: Option<Payload>,
}

impl OperationRequest {
    pub fn new(operation: Operation, input: impl Into<PathBuf>) -> Self {
        Self { operation, input: input.into(), method: None, payload: None }
    }

    pub fn with_method(mut self, method: LockMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Result of one external transformation.
///
/// Diagnostics are captured unconditionally but are only meaningful when
/// the status is a failure.
#[derive(Debug)]
pub struct TransformResult {
    /// Whether the external tool exited successfully.
    pub success: bool,

    /// Location of the produced artifact, `None` after a failure.
    pub output: Option<PathBuf>,

    /// Captured stderr of the invoked tool.
    pub diagnostics: String,
}

impl TransformResult {
    /// Successful completion with the artifact at `output`.
    #[inline]
    pub fn completed(output: PathBuf, diagnostics: String) -> Self {
        Self { success: true, output: Some(output), diagnostics }
    }

    /// Tool failure; partial output has already been removed by the invoker.
    #[inline]
    pub fn failed(diagnostics: String) -> Self {
        Self { success: false, output: None, diagnostics }
    }

    /// The artifact path, for success paths that have verified `success`.
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Explicit, user-gated follow-up after a successful operation.
///
/// Deleting the source is never automatic; it is one of these choices and
/// the default is to do nothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum FollowUp {
    #[strum(serialize = "Do nothing")]
    Nothing,

    #[strum(serialize = "Delete the source file")]
    DeleteSource,

    #[strum(serialize = "Reveal the output folder")]
    RevealOutput,
}

/// How a single orchestration pass ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunStatus {
    /// Transform ran and succeeded; outcome handled.
    Completed,

    /// Transform ran and failed; failure logged and shown.
    ToolFailed,

    /// User dismissed the credential prompt; silent no-op.
    Cancelled,
}
