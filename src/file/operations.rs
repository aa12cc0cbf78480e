//! Deterministic output locations and basic file operations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::{ARCHIVE_EXTENSION, CIPHER_EXTENSION, EXTRACT_DIR_SUFFIX, PAYLOAD_SUFFIX, STEGO_SUFFIX};
use crate::types::TransformKind;

/// Derives the output location for a transform, relative to its input.
///
/// Lock paths append the tool's extension; unlock paths strip it. Archive
/// extraction gets a dedicated sibling directory. Steganography outputs get
/// a derived sibling name so the carrier is never overwritten.
#[must_use]
pub fn output_path(kind: TransformKind, input: &Path) -> PathBuf {
    match kind {
        TransformKind::EncryptStrong => append_extension(input, CIPHER_EXTENSION),
        TransformKind::EncryptArchive => append_extension(input, ARCHIVE_EXTENSION),
        TransformKind::DecryptStrong => strip_extension(input, CIPHER_EXTENSION),
        TransformKind::DecryptArchive => sibling(input, EXTRACT_DIR_SUFFIX),
        TransformKind::EmbedPayload => {
            let stem = sibling(input, STEGO_SUFFIX);
            match input.extension() {
                Some(ext) => stem.with_extension(ext),
                None => stem,
            }
        }
        TransformKind::ExtractPayload => sibling(input, PAYLOAD_SUFFIX),
    }
}

fn append_extension(input: &Path, extension: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(extension);
    PathBuf::from(name)
}

fn strip_extension(input: &Path, extension: &str) -> PathBuf {
    input
        .to_string_lossy()
        .strip_suffix(extension)
        .map_or_else(|| input.to_path_buf(), PathBuf::from)
}

/// Sibling path built from the input's stem plus a suffix.
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().map_or_else(|| input.as_os_str().to_os_string(), |s| s.to_os_string());
    let mut name = stem;
    name.push(suffix);
    input.with_file_name(name)
}

/// Removes a file, surfacing a readable error when it is already gone.
pub fn delete_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("not found: {}", path.display());
    }

    fs::remove_file(path).with_context(|| format!("cannot remove: {}", path.display()))
}

/// Removes a produced artifact, whether it is a file or an extraction
/// directory. Used by the invoker's failure cleanup; absence is fine.
pub fn remove_artifact(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).with_context(|| format!("cannot remove directory: {}", path.display()))
        }
        Ok(_) => fs::remove_file(path).with_context(|| format!("cannot remove: {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("stat failed: {}", path.display())),
    }
}
