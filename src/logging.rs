//! Append-only operation log.
//!
//! One log file under the application directory, created at startup with
//! owner-only permissions and never torn down. Every completed or failed
//! transform appends a timestamped line; credentials never reach this file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;

/// Process-wide operation log handle.
///
/// Opened once at startup and passed by reference into the components that
/// record outcomes. Appends are serialized through a mutex so a line is
/// always written whole; the single-operation-at-a-time discipline means
/// the lock is never contended in practice.
pub struct OpLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl OpLog {
    /// Opens (creating if absent) the log file under `base_dir`.
    ///
    /// The directory is created with mode 0o700 and the file with 0o600 on
    /// Unix, so the log is readable by the owning user only.
    pub fn open(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("failed to create application directory: {}", base_dir.display()))?;
        restrict_permissions(base_dir, 0o700)?;

        let path = base_dir.join(crate::config::LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?;
        restrict_permissions(&path, 0o600)?;

        Ok(Self { file: Mutex::new(file), path })
    }

    /// Appends one timestamped message.
    pub fn append(&self, message: &str) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = self.file.lock().expect("log mutex poisoned");
        writeln!(file, "[{stamp}] {message}").with_context(|| format!("failed to append to log: {}", self.path.display()))
    }

    /// Location of the log file, for display purposes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default application directory: `~/.veilbox`.
pub fn default_app_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .context("cannot locate the home directory (HOME is unset)")?;
    Ok(PathBuf::from(home).join(crate::config::APP_DIR_NAME))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let perms = fs::Permissions::from_mode(mode);
    fs::set_permissions(path, perms).with_context(|| format!("failed to restrict permissions: {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_append_writes_timestamped_lines() {
        let dir = tempdir().unwrap();
        let log = OpLog::open(dir.path()).unwrap();

        log.append("ok: lock a.txt -> a.txt.gpg").unwrap();
        log.append("failed: unlock b.gpg: bad data").unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("ok: lock a.txt -> a.txt.gpg"));
        assert!(lines[1].ends_with("failed: unlock b.gpg: bad data"));
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let dir = tempdir().unwrap();

        {
            let log = OpLog::open(dir.path()).unwrap();
            log.append("first run").unwrap();
        }
        {
            let log = OpLog::open(dir.path()).unwrap();
            log.append("second run").unwrap();
        }

        let log_path = dir.path().join(crate::config::LOG_FILE_NAME);
        let content = fs::read_to_string(log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let base = dir.path().join("state");
        let log = OpLog::open(&base).unwrap();

        let dir_mode = fs::metadata(&base).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(log.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
    }
}
