//! Scoped working directory
//!
//! [`cd`] enters a directory (creating it first if needed) and returns a
//! [`DirGuard`] that switches back when dropped, whether the scope ends
//! normally, through `?`, or by unwinding.
//!
//! The working directory is process-wide state. Two threads holding guards
//! at the same time will observe each other's changes.

use crate::error::ScopeError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Restores the previous working directory on drop
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    /// Directory that will be restored
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.previous) {
            Ok(()) => tracing::debug!(to = %self.previous.display(), "restored directory"),
            Err(e) => tracing::warn!(
                to = %self.previous.display(),
                error = %e,
                "failed to restore directory"
            ),
        }
    }
}

/// Change into `path`, creating it and any missing parents
///
/// # Errors
/// Returns [`ScopeError::CurrentDir`] if the current directory can't be
/// read, or [`ScopeError::Io`] if `path` can't be created or entered. The
/// working directory is unchanged on error.
pub fn cd(path: impl AsRef<Path>) -> Result<DirGuard, ScopeError> {
    let path = path.as_ref();
    let previous = env::current_dir().map_err(ScopeError::CurrentDir)?;

    fs::create_dir_all(path).map_err(|e| ScopeError::io_error(path, e))?;
    env::set_current_dir(path).map_err(|e| ScopeError::io_error(path, e))?;

    tracing::debug!(from = %previous.display(), to = %path.display(), "entered directory");
    Ok(DirGuard { previous })
}
