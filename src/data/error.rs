//! Errors raised while loading data files

use std::path::PathBuf;

use thiserror::Error;

use crate::parse::ParseError;

/// Data loading error types
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("{}: missing {what} line", .path.display())]
    MissingLine { path: PathBuf, what: &'static str },

    #[error("{}:{line}: nutrient line has no name", .path.display())]
    MissingName { path: PathBuf, line: usize },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for data loading
pub type LoadResult<T> = Result<T, LoadError>;
