//! Outcome handling: logging, presentation, and follow-up choices.
//!
//! Interprets one `TransformResult`, records it in the operation log, and
//! (in interactive mode) offers a single user-gated follow-up: delete the
//! source file or reveal the output's folder. The result is consumed by
//! value, so a result can never be handled twice.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::file::operations::delete_file;
use crate::logging::OpLog;
use crate::types::{FollowUp, OperationRequest, RunStatus, TransformResult};
use crate::ui::{display, prompt};

pub struct OutcomeHandler<'a> {
    log: &'a OpLog,
    interactive: bool,
}

impl<'a> OutcomeHandler<'a> {
    pub fn new(log: &'a OpLog, interactive: bool) -> Self {
        Self { log, interactive }
    }

    /// Logs and presents the result, then runs at most one follow-up.
    ///
    /// Credentials never reach the log; only paths and diagnostics do.
    pub fn handle(&self, result: TransformResult, request: &OperationRequest) -> Result<RunStatus> {
        if !result.success {
            self.log.append(&format!(
                "failed: {} {}: {}",
                request.operation,
                request.input.display(),
                result.diagnostics.trim_end()
            ))?;
            display::show_failure(&request.operation.to_string(), &result.diagnostics);
            return Ok(RunStatus::ToolFailed);
        }

        let output = result.output_path().context("successful transform without an output path")?;

        self.log.append(&format!(
            "ok: {} {} -> {}",
            request.operation,
            request.input.display(),
            output.display()
        ))?;
        display::show_success(&request.operation.to_string(), output);

        if self.interactive {
            match prompt::select_follow_up()? {
                FollowUp::Nothing => {}
                FollowUp::DeleteSource => {
                    // Deletion is immediate and irreversible, so it gets its
                    // own confirmation on top of the menu choice.
                    if prompt::confirm("Delete the source file permanently?")? {
                        delete_file(&request.input)?;
                        display::show_source_deleted(&request.input);
                    }
                }
                FollowUp::RevealOutput => reveal(output)?,
            }
        }

        Ok(RunStatus::Completed)
    }
}

/// Opens the artifact's containing folder in the platform file manager.
fn reveal(output: &Path) -> Result<()> {
    let target = output.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    #[cfg(target_os = "linux")]
    let program = "xdg-open";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let program = "xdg-open";

    Command::new(program)
        .arg(target)
        .spawn()
        .with_context(|| format!("failed to open file manager at {}", target.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::types::Operation;

    use super::*;

    fn request() -> OperationRequest {
        OperationRequest::new(Operation::Lock, "notes.txt")
    }

    #[test]
    fn test_success_is_logged_with_paths() {
        let dir = tempdir().unwrap();
        let log = OpLog::open(dir.path()).unwrap();
        let handler = OutcomeHandler::new(&log, false);

        let result = TransformResult::completed(PathBuf::from("notes.txt.gpg"), String::new());
        let status = handler.handle(result, &request()).unwrap();

        assert_eq!(status, RunStatus::Completed);
        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("ok: Lock notes.txt -> notes.txt.gpg"));
    }

    #[test]
    fn test_failure_logs_diagnostics_and_reports_status() {
        let dir = tempdir().unwrap();
        let log = OpLog::open(dir.path()).unwrap();
        let handler = OutcomeHandler::new(&log, false);

        let result = TransformResult::failed("gpg: decryption failed: Bad session key\n".into());
        let status = handler.handle(result, &request()).unwrap();

        assert_eq!(status, RunStatus::ToolFailed);
        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("failed: Lock notes.txt: gpg: decryption failed: Bad session key"));
    }

    #[test]
    fn test_non_interactive_never_touches_the_source() {
        let dir = tempdir().unwrap();
        let log = OpLog::open(dir.path()).unwrap();
        let source = dir.path().join("keep.txt");
        fs::write(&source, b"precious").unwrap();

        let handler = OutcomeHandler::new(&log, false);
        let result = TransformResult::completed(dir.path().join("keep.txt.gpg"), String::new());
        let mut req = request();
        req.input = source.clone();

        handler.handle(result, &req).unwrap();
        assert!(source.exists());
    }
}
