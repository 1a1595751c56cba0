//! Error types for overlay-engine

use overlay_fs::NormalizedPath;

/// Result type for overlay-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an overlay
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No kustomization.yaml found in {dir}")]
    MissingDeclaration { dir: NormalizedPath },

    #[error("Invalid declaration at {path}: {message}")]
    InvalidDeclaration {
        path: NormalizedPath,
        message: String,
    },

    #[error("Invalid resource document in {path}: {message}")]
    InvalidResource {
        path: NormalizedPath,
        message: String,
    },

    #[error("Resource '{reference}' declared in {root} does not exist")]
    MissingResource {
        reference: String,
        root: NormalizedPath,
    },

    #[error("Security: file '{path}' is not in or below '{root}'")]
    OutsideRoot {
        path: NormalizedPath,
        root: NormalizedPath,
    },

    #[error("Remote resource '{reference}' cannot be loaded from a virtual filesystem")]
    RemoteResource { reference: String },

    #[error("Plugins are disabled but {path} declares '{field}'")]
    PluginsDisabled { field: String, path: NormalizedPath },

    #[error("Field '{field}' in {path} is not supported by this engine")]
    UnsupportedField { field: String, path: NormalizedPath },

    #[error("May not add resource with an already registered id: {id}")]
    DuplicateResource { id: String },

    #[error("Cycle detected: {path} includes itself")]
    Cycle { path: NormalizedPath },

    #[error(transparent)]
    Fs(#[from] overlay_fs::Error),

    /// Failure reported by a third-party engine, passed through untouched
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn external(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::External(source.into())
    }
}
