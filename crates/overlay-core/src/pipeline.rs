//! The public entry point: detect, augment, resolve.

use overlay_engine::{OverlayEngine, ResourceListEngine};
use overlay_fs::{MemoryFs, NormalizedPath};
use overlay_manifest::{Codec, Manifest, StandardCodec};

use crate::constants::DECLARATION_FILE;
use crate::declaration::{Augmentation, augment_declaration};
use crate::{Object, Result, adapter, build_store};

/// Result of a pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The bundle has no `kustomization.yaml` in the entry directory and does
    /// not use the overlay mechanism. Not an error.
    NotApplicable,
    /// The overlay was resolved into these objects, in engine order.
    Resolved(Vec<Object>),
}

impl Outcome {
    /// Whether the bundle used the overlay mechanism.
    pub fn used_overlay(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn objects(&self) -> &[Object] {
        match self {
            Self::NotApplicable => &[],
            Self::Resolved(objects) => objects,
        }
    }

    pub fn into_objects(self) -> Vec<Object> {
        match self {
            Self::NotApplicable => Vec::new(),
            Self::Resolved(objects) => objects,
        }
    }
}

/// A materialized overlay, ready for the engine.
#[derive(Debug, Clone)]
pub struct PreparedOverlay {
    /// The virtual filesystem, including any rewritten declaration
    pub fs: MemoryFs,
    /// Directory holding the declaration
    pub entry: NormalizedPath,
    /// What happened to the declaration; `None` when there was no generated
    /// content to add
    pub augmentation: Option<Augmentation>,
}

/// Overlay resolution pipeline.
///
/// Holds no per-invocation state: every call builds and drops its own
/// virtual filesystem, so one pipeline can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<E = ResourceListEngine, C = StandardCodec> {
    engine: E,
    codec: C,
}

impl Pipeline {
    /// A pipeline with the bundled engine and the standard codec.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: OverlayEngine, C: Codec> Pipeline<E, C> {
    /// Use a different overlay engine.
    pub fn with_engine<E2: OverlayEngine>(self, engine: E2) -> Pipeline<E2, C> {
        Pipeline {
            engine,
            codec: self.codec,
        }
    }

    /// Use a different content codec.
    pub fn with_codec<C2: Codec>(self, codec: C2) -> Pipeline<E, C2> {
        Pipeline {
            engine: self.engine,
            codec,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Materialize the bundle and augment its declaration without resolving.
    ///
    /// Returns `None` when the entry directory has no declaration. An empty
    /// `entry_dir` (or `"."`) means the filesystem root.
    pub fn prepare(
        &self,
        manifest: &Manifest,
        generated: &[u8],
        entry_dir: &str,
    ) -> Result<Option<PreparedOverlay>> {
        let entry = NormalizedPath::new(entry_dir);
        let mut fs = build_store(manifest, &entry, generated, &self.codec)?;

        let declaration = entry.join(DECLARATION_FILE);
        if !fs.exists(&declaration) {
            tracing::debug!(%declaration, "No declaration found; overlay not applicable");
            return Ok(None);
        }

        let augmentation = if generated.is_empty() {
            tracing::debug!("No generated content; leaving declaration untouched");
            None
        } else {
            Some(augment_declaration(&mut fs, &entry)?)
        };

        Ok(Some(PreparedOverlay {
            fs,
            entry,
            augmentation,
        }))
    }

    /// Run the whole pipeline.
    ///
    /// Any failure aborts the invocation with no partial result; a bundle
    /// without a declaration yields [`Outcome::NotApplicable`].
    pub fn process(&self, manifest: &Manifest, generated: &[u8], entry_dir: &str) -> Result<Outcome> {
        let span = tracing::debug_span!("overlay", entry_dir = %entry_dir);
        let _guard = span.enter();

        let Some(prepared) = self.prepare(manifest, generated, entry_dir)? else {
            return Ok(Outcome::NotApplicable);
        };

        let objects = adapter::resolve(&self.engine, &prepared.fs, &prepared.entry)?;
        tracing::info!(entry = %prepared.entry, count = objects.len(), "Resolved overlay");
        Ok(Outcome::Resolved(
            objects.into_iter().map(Object::from).collect(),
        ))
    }
}

/// Run the default pipeline once.
pub fn process(manifest: &Manifest, generated: &[u8], entry_dir: &str) -> Result<Outcome> {
    Pipeline::new().process(manifest, generated, entry_dir)
}
