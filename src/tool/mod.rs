//! Transform Invoker: the only component that spawns external processes.
//!
//! Validates preconditions, stages transient handoff files, runs the tool,
//! captures its diagnostic stream, and cleans up partial output on failure.
//! All exit-status interpretation funnels through here so callers never
//! inspect raw process state.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::file::operations::{output_path, remove_artifact};
use crate::file::validation::validate_input;
use crate::secret::Secret;
use crate::types::{Payload, TransformKind, TransformResult};

pub mod chain;
pub mod plan;
pub mod scratch;

use chain::ToolChain;
use plan::SecretChannel;
use scratch::ScratchFile;

/// Runs one external transformation per call.
pub struct Invoker {
    tools: ToolChain,
    scratch_dir: PathBuf,
}

impl Invoker {
    pub fn new(tools: ToolChain) -> Self {
        Self { tools, scratch_dir: std::env::temp_dir() }
    }

    /// Redirects transient handoff files to `dir`. Test seam.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Invokes the external tool for `kind` against `input`.
    ///
    /// Returns `Err` only for failures that never reached execution
    /// (validation, staging, spawn). A tool that ran and exited non-zero is
    /// a `TransformResult` with `success == false` and its stderr captured;
    /// any partial output the tool left behind has been removed.
    pub fn invoke(
        &self,
        kind: TransformKind,
        input: &Path,
        secret: &Secret,
        payload: Option<&Payload>,
    ) -> Result<TransformResult> {
        validate_input(kind, input, payload).map_err(anyhow::Error::new)?;

        let output = output_path(kind, input);
        // Failure cleanup must not delete a file the user already had at
        // the output location.
        let output_existed = output.exists();

        // Inline messages are staged to a transient carrier file; the guard
        // unlinks it on every exit path.
        let staged_message = match payload {
            Some(Payload::Inline(text)) => {
                Some(ScratchFile::create(&self.scratch_dir, "veilbox-msg", text.as_bytes())?)
            }
            _ => None,
        };
        let payload_file: Option<&Path> = match payload {
            Some(Payload::File(path)) => Some(path),
            Some(Payload::Inline(_)) => staged_message.as_ref().map(ScratchFile::path),
            None => None,
        };

        // Secrets travel over stdin or through a 0o600 scratch file whose
        // path (not contents) becomes an argument. Never through argv.
        let passphrase_file = match plan::secret_channel(kind) {
            SecretChannel::PassFile => {
                let mut line = secret.expose_secret().as_bytes().to_vec();
                line.push(b'\n');
                Some(ScratchFile::create(&self.scratch_dir, "veilbox-pass", &line)?)
            }
            SecretChannel::Stdin => None,
        };

        let plan = plan::build(
            kind,
            &self.tools,
            input,
            &output,
            payload_file,
            passphrase_file.as_ref().map(ScratchFile::path),
        );

        tracing::debug!(kind = kind.name(), program = %plan.program.display(), "spawning transform tool");

        let mut child = Command::new(&plan.program)
            .args(&plan.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", plan.program.display()))?;

        if plan.secret_channel == SecretChannel::Stdin {
            let mut stdin = child.stdin.take().context("child stdin unavailable")?;
            let mut line = secret.expose_secret().as_bytes().to_vec();
            line.push(b'\n');
            // steghide's embed prompt reads the passphrase twice.
            let delivery = line.repeat(plan::secret_lines(kind));
            if let Err(e) = stdin.write_all(&delivery) {
                // The tool may exit before reading its stdin; its stderr
                // explains why better than a pipe error would.
                if e.kind() != ErrorKind::BrokenPipe {
                    // Reap the child before surfacing the error.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e).context("failed to deliver secret to transform tool");
                }
            }
        } else {
            drop(child.stdin.take());
        }

        let finished = child.wait_with_output().context("failed waiting for transform tool")?;
        let diagnostics = String::from_utf8_lossy(&finished.stderr).into_owned();

        if finished.status.success() {
            if output.exists() {
                return Ok(TransformResult::completed(output, diagnostics));
            }
            return Ok(TransformResult::failed(format!(
                "tool exited successfully but produced no output at {}\n{diagnostics}",
                output.display()
            )));
        }

        tracing::debug!(kind = kind.name(), code = ?finished.status.code(), "transform tool failed");

        if !output_existed {
            remove_artifact(&output)?;
        }

        Ok(TransformResult::failed(diagnostics))
    }
}
