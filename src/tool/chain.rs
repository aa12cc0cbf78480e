//! External tool resolution.
//!
//! All transformations are performed by external binaries. They are located
//! on PATH once at startup; a missing tool is fatal to the whole process
//! before any operation can start, never a per-operation surprise.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::config::{TOOL_GPG, TOOL_SEVENZIP, TOOL_STEGHIDE};

/// Resolved paths of the external transformation tools.
#[derive(Clone, Debug)]
pub struct ToolChain {
    pub gpg: PathBuf,
    pub sevenzip: PathBuf,
    pub steghide: PathBuf,
}

impl ToolChain {
    /// Locates every required tool on PATH.
    ///
    /// Reports all missing tools at once so the user fixes their
    /// environment in one pass instead of one failure at a time.
    pub fn detect() -> Result<Self> {
        let mut missing = Vec::new();

        let gpg = find_in_path(TOOL_GPG);
        let sevenzip = find_in_path(TOOL_SEVENZIP);
        let steghide = find_in_path(TOOL_STEGHIDE);

        for (name, found) in [(TOOL_GPG, &gpg), (TOOL_SEVENZIP, &sevenzip), (TOOL_STEGHIDE, &steghide)] {
            if found.is_none() {
                missing.push(name);
            }
        }

        if !missing.is_empty() {
            bail!("required tool(s) not found on PATH: {}", missing.join(", "));
        }

        Ok(Self {
            gpg: gpg.expect("checked above"),
            sevenzip: sevenzip.expect("checked above"),
            steghide: steghide.expect("checked above"),
        })
    }

    /// Builds a chain from explicit program paths. Test seam.
    pub fn with_programs(gpg: impl Into<PathBuf>, sevenzip: impl Into<PathBuf>, steghide: impl Into<PathBuf>) -> Self {
        Self { gpg: gpg.into(), sevenzip: sevenzip.into(), steghide: steghide.into() }
    }
}

/// First hit for `program` across the PATH entries.
fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path).map(|dir| dir.join(program)).find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_path_locates_a_shell() {
        // /bin/sh exists on every platform these tests run on.
        assert!(find_in_path("sh").is_some());
    }

    #[test]
    fn test_find_in_path_misses_nonsense() {
        assert!(find_in_path("veilbox-no-such-tool-xyzzy").is_none());
    }
}
