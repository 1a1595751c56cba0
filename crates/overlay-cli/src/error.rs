//! Error types for overlay-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the pipeline
    #[error(transparent)]
    Core(#[from] overlay_core::Error),

    /// Error loading the bundle manifest
    #[error(transparent)]
    Manifest(#[from] overlay_manifest::Error),

    /// Failed to read an input file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to render YAML output
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to render JSON output
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failed to set up logging
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}
