//! Transient scratch files with owner-only permissions.
//!
//! Used for the two short-lived handoffs an operation may need: a
//! passphrase file for tools that read the secret from a path argument,
//! and a carrier file for inline messages being embedded. Both are created
//! immediately before the child process starts and unlinked on every exit
//! path, including failures, via `Drop`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A file that is guaranteed to disappear when the guard is dropped.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Creates a scratch file in `dir` with mode 0o600 holding `contents`.
    ///
    /// The name embeds the process id and a counter so concurrent test
    /// processes never collide.
    pub fn create(dir: &Path, prefix: &str, contents: &[u8]) -> Result<Self> {
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("{prefix}-{}-{seq}", std::process::id()));

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&path)
            .with_context(|| format!("failed to create scratch file: {}", path.display()))?;
        file.write_all(contents)
            .with_context(|| format!("failed to write scratch file: {}", path.display()))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        // Removal failure is not actionable here; the file lives in a
        // private directory and carries a process-unique name.
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_removed_on_drop() {
        let dir = tempdir().unwrap();
        let path = {
            let scratch = ScratchFile::create(dir.path(), "veilbox-pass", b"hunter2\n").unwrap();
            assert_eq!(fs::read(scratch.path()).unwrap(), b"hunter2\n");
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create(dir.path(), "veilbox-pass", b"x").unwrap();
        let mode = fs::metadata(scratch.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_unique_names() {
        let dir = tempdir().unwrap();
        let a = ScratchFile::create(dir.path(), "p", b"1").unwrap();
        let b = ScratchFile::create(dir.path(), "p", b"2").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
