//! Error types for the data-loader crate.
//!
//! Only conditions that abort a load are errors. Malformed rows are
//! recovered where they are read (skipped, or numeric fields defaulted)
//! and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the ratings and titles files
///
/// Every variant is fatal to the stage that raised it. Callers are
/// expected to stop rather than retry.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error occurred part way through reading a file
    #[error("I/O error while reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The join pipeline needs at least one worker
    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    /// The dedicated worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl DataLoadError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataLoadError::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataLoadError::Read {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_open_error_names_path() {
        let err = DataLoadError::open(
            "data/title.ratings.tsv",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let message = err.to_string();
        assert!(message.contains("data/title.ratings.tsv"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = DataLoadError::read(
            "title.basics.tsv",
            io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"),
        );
        assert!(err.source().is_some());
    }
}
