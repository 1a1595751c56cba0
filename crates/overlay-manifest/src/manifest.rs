//! Bundle manifest: the ordered list of named, encoded resources.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "resources": [
//!     { "name": "kustomize/kustomization.yaml", "content": "cmVzb3VyY2VzOiBbXQo=", "encoding": "base64" },
//!     { "name": "chart/values.yaml", "content": "replicas: 2\n" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Codec, Error, Result};

/// An ordered collection of bundle resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// One named, encoded fragment of a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Path-like name, e.g. `kustomize/overlays/prod/kustomization.yaml`
    pub name: String,
    /// Encoded content
    #[serde(default)]
    pub content: String,
    /// Encoding tag; empty means plain text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub encoding: String,
}

impl Resource {
    /// A resource stored as plain text.
    pub fn plain(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            encoding: String::new(),
        }
    }

    /// Decode this resource's content with `codec`.
    pub fn decode(&self, codec: &dyn Codec) -> Result<Vec<u8>> {
        codec.decode(&self.content, &self.encoding)
    }
}

impl Manifest {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))
    }

    /// Load a manifest from disk.
    ///
    /// Format is detected from file extension:
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        tracing::debug!(path = %path.display(), %extension, "Loading manifest");
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Resources whose name starts with `prefix`, paired with the remainder
    /// of their name.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Resource)> + 'a {
        self.resources
            .iter()
            .filter_map(move |r| r.name.strip_prefix(prefix).map(|rest| (rest, r)))
    }
}
