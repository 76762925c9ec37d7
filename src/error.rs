//! Typed failures for the scan core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a scan fails as a whole.
///
/// Per-file problems (unreadable files, non-UTF-8 content, oversized
/// files) never show up here: they only drop that file from the affected
/// aggregate.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot access '{}': No such file or directory", .0.display())]
    RootNotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot resolve '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("top must be a positive integer")]
    InvalidTop,
}

pub type Result<T> = std::result::Result<T, ScanError>;
