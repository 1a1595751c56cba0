//! Error types for overlay-manifest

use std::path::PathBuf;

/// Result type for overlay-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in overlay-manifest operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported content encoding: {encoding:?}")]
    UnsupportedEncoding { encoding: String },

    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to decompress gzip content: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to parse {format} manifest: {message}")]
    Parse { format: String, message: String },

    #[error("Unsupported manifest format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }
}
