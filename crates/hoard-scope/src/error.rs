//! Error types for scoped helpers

use std::path::PathBuf;

/// Errors from scoped helpers
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Current working directory could not be read
    #[error("cannot read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// Target directory could not be created or entered
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScopeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
