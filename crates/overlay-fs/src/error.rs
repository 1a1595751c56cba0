//! Error types for overlay-fs

use crate::NormalizedPath;

/// Result type for overlay-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in overlay-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path collision at {path}: a file with different content was already written")]
    PathCollision { path: NormalizedPath },

    #[error("Not a file: {path}")]
    NotAFile { path: NormalizedPath },

    #[error("Not a directory: {path} is a file")]
    NotADirectory { path: NormalizedPath },

    #[error("File not found: {path}")]
    NotFound { path: NormalizedPath },

    #[error("File at {path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: NormalizedPath,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
