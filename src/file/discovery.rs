//! Candidate-file discovery for the interactive menu.
//!
//! Walks the working directory and offers only files that make sense for
//! the selected operation: plain files for locking, recognized artifacts
//! for unlocking, supported carrier images for the steganography flows.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{DISCOVERY_MAX_DEPTH, DISCOVERY_MAX_FILES, EXCLUDED_NAMES};
use crate::file::validation::{is_archive_file, is_cipher_file, is_supported_image};
use crate::types::Operation;

/// Finds files in (and below) `root` that are eligible for `operation`.
pub fn find_candidates(operation: Operation, root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .max_depth(DISCOVERY_MAX_DEPTH)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.path()));

    for entry in walker.flatten() {
        if files.len() >= DISCOVERY_MAX_FILES {
            break;
        }
        let path = entry.path();
        if entry.file_type().is_file() && is_eligible(path, operation) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files
}

/// Whether a single file is a sensible target for the operation.
pub fn is_eligible(path: &Path, operation: Operation) -> bool {
    let protected = is_cipher_file(path) || is_archive_file(path);
    match operation {
        Operation::Lock => !protected,
        Operation::Unlock => protected,
        Operation::HideData | Operation::ExtractData => is_supported_image(path),
    }
}

fn is_excluded(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };

    if EXCLUDED_NAMES.iter().any(|excluded| name.as_ref() == *excluded) {
        return true;
    }

    // Hidden entries are skipped, except the walk root itself (".").
    name.starts_with('.') && name.len() > 1
}
