//! Error types for overlay-core

/// Result type for overlay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline invocation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A bundle resource could not be decoded
    #[error("Failed to decode resource {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: overlay_manifest::Error,
    },

    /// The virtual filesystem rejected a write while materializing the bundle
    #[error("Failed to write to the virtual filesystem: {0}")]
    StoreWrite(#[source] overlay_fs::Error),

    /// The declaration could not be read back for augmentation
    #[error("Failed to read declaration: {0}")]
    DeclarationRead(#[source] overlay_fs::Error),

    /// The augmented declaration could not be serialized
    #[error("Failed to serialize declaration: {0}")]
    DeclarationSerialize(#[source] serde_yaml::Error),

    /// The augmented declaration could not be written back
    #[error("Failed to write declaration: {0}")]
    DeclarationWrite(#[source] overlay_fs::Error),

    /// The overlay engine failed; passed through unchanged
    #[error(transparent)]
    Engine(#[from] overlay_engine::Error),
}
