//! User interface components for terminal interaction.
//!
//! # Modules
//!
//! - [`display`]: banner, styled messages, file tables
//! - [`progress`]: percent-based progress bar
//! - [`prompt`]: interactive selection, text, and confirmation dialogs

pub mod display;
pub mod progress;
pub mod prompt;
