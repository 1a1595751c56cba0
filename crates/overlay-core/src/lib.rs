//! Overlay bundle resolution pipeline
//!
//! Materializes a bundle's overlay fragments and a generated manifest into
//! an in-memory filesystem, makes sure the overlay declaration lists the
//! generated manifest, and hands the result to an [`OverlayEngine`].
//!
//! ```rust,no_run
//! use overlay_core::{Outcome, process};
//! use overlay_manifest::{Manifest, Resource};
//!
//! let manifest = Manifest::new(vec![Resource::plain(
//!     "kustomize/kustomization.yaml",
//!     "resources: []\n",
//! )]);
//! let generated = b"apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: app\n";
//!
//! match process(&manifest, generated, "").unwrap() {
//!     Outcome::NotApplicable => println!("bundle does not use an overlay"),
//!     Outcome::Resolved(objects) => println!("{} objects", objects.len()),
//! }
//! ```

pub mod adapter;
pub mod builder;
pub mod constants;
pub mod declaration;
pub mod error;
pub mod object;
pub mod pipeline;

pub use builder::build_store;
pub use declaration::{Augmentation, augment_declaration};
pub use error::{Error, Result};
pub use object::Object;
pub use pipeline::{Outcome, Pipeline, PreparedOverlay, process};

pub use overlay_engine::{EngineOptions, OverlayEngine, ResourceListEngine};
pub use overlay_fs::{MemoryFs, NormalizedPath};
