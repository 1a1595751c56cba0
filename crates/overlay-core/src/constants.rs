//! Fixed names shared by bundles and overlays.

/// Overlay declaration file, looked up in the entry directory.
pub const DECLARATION_FILE: &str = overlay_engine::DECLARATION_FILE;

/// File the generated manifest is written to, next to the declaration.
pub const GENERATED_FILE: &str = "manifests.yaml";

/// Bundle resources under this prefix belong to the overlay.
pub const NAMESPACE_PREFIX: &str = "kustomize/";

/// Declaration key holding the ordered resource list.
pub const RESOURCES_KEY: &str = "resources";
