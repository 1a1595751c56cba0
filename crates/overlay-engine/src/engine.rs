//! The capability interface every overlay engine implements

use overlay_fs::{MemoryFs, NormalizedPath};

use crate::{EngineOptions, ObjectMap, Result};

/// Resolves an overlay held in a virtual filesystem into plain objects.
///
/// Implementations must only read through `fs`, must honor `options`, and
/// must return objects in the order the overlay declares them. The call is
/// synchronous; callers needing a time bound wrap it themselves.
pub trait OverlayEngine: Send + Sync {
    fn resolve(
        &self,
        fs: &MemoryFs,
        entry: &NormalizedPath,
        options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>>;
}

impl<E: OverlayEngine + ?Sized> OverlayEngine for Box<E> {
    fn resolve(
        &self,
        fs: &MemoryFs,
        entry: &NormalizedPath,
        options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>> {
        (**self).resolve(fs, entry, options)
    }
}

impl<E: OverlayEngine + ?Sized> OverlayEngine for &E {
    fn resolve(
        &self,
        fs: &MemoryFs,
        entry: &NormalizedPath,
        options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>> {
        (**self).resolve(fs, entry, options)
    }
}
