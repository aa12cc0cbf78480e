//! VeilBox - Guarded file protection and image steganography.
//!
//! An interactive front-end that protects files and conceals data using:
//! - gpg for strong symmetric encryption
//! - 7z for password-protected archiving
//! - steghide for hiding payloads inside images
//!
//! The byte-level transforms live in those external tools; this crate
//! sequences them: credential collection, guarded invocation with progress
//! reporting, outcome handling, and an append-only operation log.

mod allocator;

pub mod app;
pub mod config;
pub mod credential;
pub mod error;
pub mod file;
pub mod logging;
pub mod orchestrator;
pub mod outcome;
pub mod progress;
pub mod secret;
pub mod tool;
pub mod types;
pub mod ui;
