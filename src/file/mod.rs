//! Filesystem concerns: input validation, output paths, and discovery.

pub mod discovery;
pub mod operations;
pub mod validation;
