//! [`BundleBuilder`] for manifest test scenarios.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::GzEncoder;
use overlay_manifest::{Manifest, Resource};

/// Builds a [`Manifest`] resource by resource.
///
/// # Example
///
/// ```rust
/// use overlay_test_utils::bundle::BundleBuilder;
///
/// let manifest = BundleBuilder::new()
///     .overlay_file("kustomization.yaml", "resources: []\n")
///     .plain("chart/values.yaml", "replicas: 1\n")
///     .build();
/// assert_eq!(manifest.resources.len(), 2);
/// assert_eq!(manifest.resources[0].name, "kustomize/kustomization.yaml");
/// ```
#[derive(Debug, Default)]
pub struct BundleBuilder {
    resources: Vec<Resource>,
}

impl BundleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource stored as plain text.
    pub fn plain(mut self, name: &str, content: &str) -> Self {
        self.resources.push(Resource::plain(name, content));
        self
    }

    /// Add a `base64` encoded resource.
    pub fn base64(mut self, name: &str, content: &str) -> Self {
        self.resources.push(Resource {
            name: name.to_string(),
            content: STANDARD.encode(content),
            encoding: "base64".to_string(),
        });
        self
    }

    /// Add a `base64+gz` encoded resource.
    pub fn gzipped(mut self, name: &str, content: &str) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(content.as_bytes())
            .expect("writing to an in-memory gzip encoder cannot fail");
        let compressed = encoder
            .finish()
            .expect("finishing an in-memory gzip encoder cannot fail");
        self.resources.push(Resource {
            name: name.to_string(),
            content: STANDARD.encode(compressed),
            encoding: "base64+gz".to_string(),
        });
        self
    }

    /// Add a resource with an arbitrary encoding tag and raw content.
    pub fn encoded(mut self, name: &str, content: &str, encoding: &str) -> Self {
        self.resources.push(Resource {
            name: name.to_string(),
            content: content.to_string(),
            encoding: encoding.to_string(),
        });
        self
    }

    /// Add a base64 encoded file under the `kustomize/` namespace.
    pub fn overlay_file(self, path: &str, content: &str) -> Self {
        self.base64(&format!("kustomize/{path}"), content)
    }

    pub fn build(self) -> Manifest {
        Manifest::new(self.resources)
    }
}
