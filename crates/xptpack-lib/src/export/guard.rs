//! Per-project run lock

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lock file name at the project root
pub const LOCK_FILE: &str = ".xptpack.lock";

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("An export is already running for {} (remove {} if it is stale)", .root.display(), .lock.display())]
    RunInProgress { root: PathBuf, lock: PathBuf },

    #[error("Failed to create lock file {}: {source}", .lock.display())]
    LockFailed {
        lock: PathBuf,
        source: std::io::Error,
    },
}

/// Held for the duration of one export; the lock file is removed on drop
#[derive(Debug)]
pub struct RunGuard {
    lock: PathBuf,
}

impl RunGuard {
    pub fn acquire(root: &Path) -> Result<Self, GuardError> {
        let lock = root.join(LOCK_FILE);
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(GuardError::RunInProgress {
                    root: root.to_path_buf(),
                    lock,
                });
            }
            Err(source) => return Err(GuardError::LockFailed { lock, source }),
        };

        // Owner pid helps when cleaning up after a crash
        if let Err(source) = writeln!(file, "{}", std::process::id()) {
            let _ = std::fs::remove_file(&lock);
            return Err(GuardError::LockFailed { lock, source });
        }

        tracing::trace!(lock = %lock.display(), "Acquired run guard");
        Ok(Self { lock })
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.lock) {
            tracing::warn!(lock = %self.lock.display(), error = %e, "Failed to remove run guard");
        }
    }
}

#[cfg(test)]
mod tests {
    include!("guard.test.rs");
}
