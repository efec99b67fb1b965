//! Per-entry advisory locking for the artifact cache
//!
//! One lock file accompanies each cache entry and serializes that entry's
//! download-or-extract critical section across threads and processes.
//! The lock is an OS advisory lock tied to the holding process, so a
//! crashed holder releases it automatically. Lock files themselves are
//! never removed.

use crate::error::{QescopeError, QescopeResult};
use fs4::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An acquired exclusive lock for one cache entry.
///
/// Released on drop, or by the OS when the owning process exits.
/// Acquisition blocks without a timeout: a long-running holder delays
/// other callers of the same entry, but distinct entries never contend.
pub struct EntryLock {
    file: File,
    path: PathBuf,
}

impl EntryLock {
    /// Block until the exclusive lock for `cache_path` is held.
    ///
    /// The lock file lives next to the entry at `<cache_path>.lock` and
    /// never contains payload data.
    pub fn acquire(cache_path: &Path) -> QescopeResult<Self> {
        let path = lock_path(cache_path);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| QescopeError::io(format!("opening lock file {}", path.display()), e))?;

        file.lock_exclusive()
            .map_err(|e| QescopeError::io(format!("locking {}", path.display()), e))?;
        debug!("acquired entry lock {}", path.display());

        Ok(Self { file, path })
    }

    /// Path of the underlying lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EntryLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!("failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

/// Companion lock file path for a cache entry
pub fn lock_path(cache_path: &Path) -> PathBuf {
    let mut os = cache_path.as_os_str().to_os_string();
    os.push(".lock");
    PathBuf::from(os)
}
