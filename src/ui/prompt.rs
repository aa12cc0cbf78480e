//! Interactive prompts for the menu loop.
//!
//! Selection, text, and confirmation dialogs built on inquire. Every
//! prompt treats Esc as a cancellation and reports it as `None`, never as
//! an error, so callers can unwind silently.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use inquire::{Confirm, InquireError, Select, Text};
use strum::IntoEnumIterator;

use crate::types::{FollowUp, LockMethod, Operation};

/// Top-level menu outcome.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuChoice {
    Run(Operation),
    Exit,
}

/// Main menu: one entry per operation, plus Exit.
pub fn main_menu() -> Result<MenuChoice> {
    let mut items: Vec<String> = Operation::iter().map(|op| op.to_string()).collect();
    items.push("Exit".to_string());

    let Some(choice) = cancellable(Select::new("Select an action", items.clone()).prompt())? else {
        return Ok(MenuChoice::Exit);
    };

    let index = items.iter().position(|i| *i == choice).expect("selection from offered items");
    Ok(Operation::iter().nth(index).map_or(MenuChoice::Exit, MenuChoice::Run))
}

/// Lock method selection.
pub fn select_method() -> Result<Option<LockMethod>> {
    let methods: Vec<LockMethod> = LockMethod::iter().collect();
    cancellable(Select::new("Select protection method", methods).prompt())
}

/// Picks one file from the discovered candidates.
pub fn select_file(files: &[PathBuf]) -> Result<Option<PathBuf>> {
    let items: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    let Some(choice) = cancellable(Select::new("Select file", items).prompt())? else {
        return Ok(None);
    };
    Ok(Some(PathBuf::from(choice)))
}

/// Free-form path entry, used when discovery finds nothing.
pub fn input_path(message: &str) -> Result<Option<PathBuf>> {
    let Some(entry) = cancellable(Text::new(message).prompt())? else {
        return Ok(None);
    };
    let entry = entry.trim();
    if entry.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(entry)))
}

/// What the hide flow conceals.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PayloadSource {
    File,
    Message,
}

/// Asks whether to hide a file or an inline text message.
pub fn select_payload_source() -> Result<Option<PayloadSource>> {
    let items = vec!["Hide a file", "Hide a text message"];
    let Some(choice) = cancellable(Select::new("What should be hidden?", items).prompt())? else {
        return Ok(None);
    };
    Ok(Some(if choice == "Hide a file" { PayloadSource::File } else { PayloadSource::Message }))
}

/// Inline message entry for the hide flow.
pub fn input_message() -> Result<Option<String>> {
    let Some(entry) = cancellable(Text::new("Message to hide").prompt())? else {
        return Ok(None);
    };
    if entry.is_empty() {
        return Ok(None);
    }
    Ok(Some(entry))
}

/// Post-success follow-up choice; dismissing means "do nothing".
pub fn select_follow_up() -> Result<FollowUp> {
    let choices: Vec<FollowUp> = FollowUp::iter().collect();
    Ok(cancellable(Select::new("Next step?", choices).prompt())?.unwrap_or(FollowUp::Nothing))
}

/// Yes/no confirmation defaulting to "no".
pub fn confirm(message: &str) -> Result<bool> {
    Ok(cancellable(Confirm::new(message).with_default(false).prompt())?.unwrap_or(false))
}

/// Maps a dismissed prompt to `None` and real failures to errors.
fn cancellable<T>(outcome: Result<T, InquireError>) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(anyhow!("prompt failed: {e}")),
    }
}
