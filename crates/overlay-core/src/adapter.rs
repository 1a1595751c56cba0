//! Runs the overlay engine against the virtual filesystem

use overlay_engine::{EngineOptions, ObjectMap, OverlayEngine};
use overlay_fs::{MemoryFs, NormalizedPath};

use crate::Result;

/// Resolve the overlay rooted at `entry`.
///
/// The engine is always configured with root-only load restrictions and
/// plugins disabled. Its errors are returned unchanged and never retried.
pub fn resolve(
    engine: &dyn OverlayEngine,
    fs: &MemoryFs,
    entry: &NormalizedPath,
) -> Result<Vec<ObjectMap>> {
    let options = EngineOptions::locked_down();
    tracing::debug!(%entry, files = fs.len(), ?options, "Invoking overlay engine");
    Ok(engine.resolve(fs, entry, &options)?)
}
