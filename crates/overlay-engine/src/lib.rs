//! Overlay resolution engine interface
//!
//! The pipeline only depends on the [`OverlayEngine`] trait. Any concrete
//! merge engine is one interchangeable implementation of it;
//! [`ResourceListEngine`] is the bundled one and understands nothing but
//! plain `resources` lists.

pub mod engine;
pub mod error;
pub mod object;
pub mod options;
pub mod resource_list;

pub use engine::OverlayEngine;
pub use error::{Error, Result};
pub use object::{ObjectMap, yaml_to_json};
pub use options::{EngineOptions, LoadRestrictions, PluginPolicy};
pub use resource_list::ResourceListEngine;

/// File name of the declaration inside every overlay directory.
pub const DECLARATION_FILE: &str = "kustomization.yaml";
