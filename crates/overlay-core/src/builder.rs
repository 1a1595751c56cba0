//! Materializes a bundle into a virtual filesystem

use overlay_fs::{MemoryFs, NormalizedPath};
use overlay_manifest::{Codec, Manifest};

use crate::constants::{GENERATED_FILE, NAMESPACE_PREFIX};
use crate::{Error, Result};

/// Build the virtual filesystem for one invocation.
///
/// Every resource named `kustomize/<path>` is decoded and written to
/// `/<path>`; other resources are skipped. The generated manifest is then
/// written to `<base>/manifests.yaml`, even when it is empty or no resource
/// matched. Any decode or write failure aborts the build.
pub fn build_store(
    manifest: &Manifest,
    base: &NormalizedPath,
    generated: &[u8],
    codec: &dyn Codec,
) -> Result<MemoryFs> {
    let mut fs = MemoryFs::new();

    for (name, resource) in manifest.with_prefix(NAMESPACE_PREFIX) {
        let data = resource.decode(codec).map_err(|source| Error::Decode {
            name: resource.name.clone(),
            source,
        })?;
        let path = NormalizedPath::new(name);
        tracing::debug!(%path, bytes = data.len(), "Materializing overlay file");
        fs.add_file(&path, data).map_err(Error::StoreWrite)?;
    }

    let generated_path = base.join(GENERATED_FILE);
    let shadowed = fs
        .write_file(&generated_path, generated)
        .map_err(Error::StoreWrite)?;
    if shadowed.is_some() {
        tracing::warn!(path = %generated_path, "Generated manifest replaces a bundled file");
    }

    Ok(fs)
}
