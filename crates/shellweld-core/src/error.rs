//! Error types for the expansion engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for expansion operations.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// Errors that can occur while expanding a script.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// Source file could not be opened or read.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file referenced by an inclusion directive failed to expand.
    ///
    /// Wraps the nested failure so the full inclusion chain is visible
    /// when the error is reported at the top level.
    #[error("Included from '{path}'")]
    IncludeFailed {
        path: PathBuf,
        #[source]
        source: Box<ExpandError>,
    },

    /// Inclusion nesting exceeded the configured ceiling.
    #[error("Inclusion depth limit of {limit} exceeded while expanding '{path}'")]
    DepthLimitExceeded { path: PathBuf, limit: usize },

    /// Clean level above the supported maximum.
    #[error("Clean level {0} is out of range (maximum is 2)")]
    CleanLevelOutOfRange(u8),
}

impl ExpandError {
    /// Creates a new file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Wraps a nested expansion failure with the file that included it.
    pub fn include_failed(path: impl Into<PathBuf>, source: ExpandError) -> Self {
        Self::IncludeFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
