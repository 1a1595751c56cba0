//! In-memory virtual filesystem for overlay resolution
//!
//! Provides rooted, normalized paths and an ephemeral file store that the
//! overlay engine reads from. Nothing here touches the host filesystem.

pub mod error;
pub mod memory;
pub mod path;

pub use error::{Error, Result};
pub use memory::MemoryFs;
pub use path::NormalizedPath;
