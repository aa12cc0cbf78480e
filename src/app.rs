//! Application entry points: CLI surface and the interactive menu loop.
//!
//! Provisioning happens once here before any operation can start: tracing
//! is initialized, the operation log is opened under the application
//! directory, and every required external tool is located on PATH. A
//! missing tool is fatal to the whole process, not to one operation.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::file::discovery::find_candidates;
use crate::logging::{OpLog, default_app_dir};
use crate::orchestrator::Orchestrator;
use crate::tool::chain::ToolChain;
use crate::tool::Invoker;
use crate::types::{Operation, OperationRequest, Payload, RunStatus};
use crate::ui::prompt::{MenuChoice, PayloadSource};
use crate::ui::{display, prompt};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hide a payload file or an inline message inside an image.
    Hide {
        /// Carrier image (jpg, jpeg, bmp, wav, au).
        #[arg(short = 'i', long = "image")]
        image: PathBuf,

        /// File to hide inside the image.
        #[arg(short = 'd', long = "data", required_unless_present = "message", conflicts_with = "message")]
        data: Option<PathBuf>,

        /// Text message to hide instead of a file.
        #[arg(short = 'm', long = "message")]
        message: Option<String>,
    },

    /// Extract a previously hidden payload from an image.
    Extract {
        /// Image carrying the hidden payload.
        #[arg(short = 'i', long = "image")]
        image: PathBuf,
    },

    /// Start interactive mode (the default when no command is given).
    Interactive,
}

#[derive(Debug, Parser)]
#[command(name = "veilbox", version, about = "Protect files with encryption or password-protected archives and conceal data inside images. Run without arguments for interactive mode.")]
pub struct App {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl App {
    pub fn init() -> Result<Self> {
        let subscriber = tracing_subscriber::fmt().with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        // Usage errors exit 1 (clap's default is 2); help and version
        // output keep exit 0.
        match Self::try_parse() {
            Ok(app) => Ok(app),
            Err(error) => {
                let _ = error.print();
                std::process::exit(i32::from(error.use_stderr()));
            }
        }
    }

    pub fn execute(self) -> Result<()> {
        let log = OpLog::open(&default_app_dir()?)?;
        let tools = ToolChain::detect()?;
        let invoker = Invoker::new(tools);

        match self.command {
            Some(Commands::Hide { image, data, message }) => {
                let payload = match (data, message) {
                    (Some(file), None) => Payload::File(file),
                    (None, Some(text)) => Payload::Inline(text),
                    // clap enforces exactly one of the two.
                    _ => bail!("exactly one of --data or --message is required"),
                };
                let request = OperationRequest::new(Operation::HideData, image).with_payload(payload);
                Self::run_one_shot(&Orchestrator::new(invoker, &log, false), &request)
            }
            Some(Commands::Extract { image }) => {
                let request = OperationRequest::new(Operation::ExtractData, image);
                Self::run_one_shot(&Orchestrator::new(invoker, &log, false), &request)
            }
            Some(Commands::Interactive) | None => Self::run_interactive(&Orchestrator::new(invoker, &log, true), &log),
        }
    }

    /// One-shot commands report through the outcome handler; a failed
    /// transform maps to a non-zero exit.
    fn run_one_shot(orchestrator: &Orchestrator<'_>, request: &OperationRequest) -> Result<()> {
        match orchestrator.run(request)? {
            RunStatus::Completed | RunStatus::Cancelled => Ok(()),
            RunStatus::ToolFailed => bail!("operation failed"),
        }
    }

    /// The menu loop. Per-operation errors are shown and the loop
    /// continues; only environment-level failures end the process.
    fn run_interactive(orchestrator: &Orchestrator<'_>, log: &OpLog) -> Result<()> {
        display::clear_screen()?;
        display::print_banner();
        display::show_log_location(log.path());

        loop {
            println!();
            match prompt::main_menu()? {
                MenuChoice::Exit => return Ok(()),
                MenuChoice::Run(operation) => {
                    if let Err(error) = Self::run_menu_operation(orchestrator, operation) {
                        display::show_error(&error);
                    }
                }
            }
        }
    }

    /// Builds a request for one menu selection and runs it to completion.
    /// Any dismissed prompt unwinds silently back to the menu.
    fn run_menu_operation(orchestrator: &Orchestrator<'_>, operation: Operation) -> Result<()> {
        let Some(input) = Self::select_target(operation)? else {
            return Ok(());
        };

        let mut request = OperationRequest::new(operation, input);

        if operation == Operation::Lock {
            let Some(method) = prompt::select_method()? else {
                return Ok(());
            };
            request = request.with_method(method);
        }

        if operation == Operation::HideData {
            let Some(payload) = Self::select_payload()? else {
                return Ok(());
            };
            request = request.with_payload(payload);
        }

        orchestrator.run(&request)?;
        Ok(())
    }

    /// Offers discovered candidates, falling back to free-form entry when
    /// the working directory has nothing eligible.
    fn select_target(operation: Operation) -> Result<Option<PathBuf>> {
        let candidates = find_candidates(operation, Path::new("."));
        if candidates.is_empty() {
            return prompt::input_path("Target file path");
        }

        display::show_file_table(&candidates);
        prompt::select_file(&candidates)
    }

    fn select_payload() -> Result<Option<Payload>> {
        match prompt::select_payload_source()? {
            Some(PayloadSource::File) => Ok(prompt::input_path("Payload file path")?.map(Payload::File)),
            Some(PayloadSource::Message) => Ok(prompt::input_message()?.map(Payload::Inline)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_arguments_are_usage_errors() {
        let err = App::try_parse_from(["veilbox", "hide"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_conflicting_payload_sources_are_usage_errors() {
        let err = App::try_parse_from(["veilbox", "hide", "-i", "a.jpg", "-d", "f.txt", "-m", "hi"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_version_output_is_not_a_usage_error() {
        let err = App::try_parse_from(["veilbox", "--version"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
