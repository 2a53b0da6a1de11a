//! # Repository Process Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). The OS drops the lock when the holding process exits, so a
//! crashed node never leaves a stale lock behind.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::errors::LockError;

/// Exclusive lock on a repository directory.
///
/// Acquired when the repository is opened, released on drop (RAII).
pub struct RepoLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
    /// PID of this process
    pid: u32,
}

impl RepoLock {
    /// Lock file name
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Acquire an exclusive lock on `dir`. Does not wait.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if another handle holds the lock.
    pub fn acquire(dir: &Path) -> Result<Self, LockError> {
        let path = dir.join(Self::LOCK_FILE);

        // No truncate here: the current holder's PID must survive a failed attempt
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&path),
                path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(LockError::CreateFailed)?;
        writeln!(file, "{}", pid).map_err(LockError::CreateFailed)?;
        file.sync_all().map_err(LockError::CreateFailed)?;

        tracing::debug!("[repo] Acquired {} (pid {})", path.display(), pid);
        Ok(Self { file, path, pid })
    }

    /// Get the PID of the process holding the lock
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        // Fully qualified: newer std has an inherent `File::unlock`
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_contains_pid() {
        let dir = tempfile::tempdir().unwrap();

        let lock = RepoLock::acquire(dir.path()).expect("Should acquire lock");
        let content = std::fs::read_to_string(lock.path()).unwrap();
        assert_eq!(content.trim().parse::<u32>().unwrap(), std::process::id());
        assert_eq!(lock.pid(), std::process::id());
    }

    #[test]
    fn test_double_lock_fails_with_holder_pid() {
        let dir = tempfile::tempdir().unwrap();

        let _held = RepoLock::acquire(dir.path()).expect("First lock should succeed");
        match RepoLock::acquire(dir.path()) {
            Err(LockError::AlreadyLocked { pid, .. }) => {
                assert_eq!(pid, Some(std::process::id()));
            }
            other => panic!("expected AlreadyLocked, got {:?}", other.map(|l| l.pid())),
        }
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();

        {
            let _lock = RepoLock::acquire(dir.path()).expect("Should acquire");
        }
        assert!(!dir.path().join(RepoLock::LOCK_FILE).exists());

        RepoLock::acquire(dir.path()).expect("Should acquire after release");
    }
}
