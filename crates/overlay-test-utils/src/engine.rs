//! Engines for exercising the pipeline without a real merge engine.

use std::sync::Mutex;

use overlay_engine::{EngineOptions, Error, ObjectMap, OverlayEngine, Result};
use overlay_fs::{MemoryFs, NormalizedPath};

/// What a [`RecordingEngine`] was called with.
#[derive(Debug, Clone)]
pub struct Call {
    pub fs: MemoryFs,
    pub entry: NormalizedPath,
    pub options: EngineOptions,
}

/// Records every call and returns a fixed set of objects.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    objects: Vec<ObjectMap>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `objects` from every call.
    pub fn returning(objects: Vec<ObjectMap>) -> Self {
        Self {
            objects,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The single call made so far. Panics unless exactly one call happened.
    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one engine call");
        calls.into_iter().next().unwrap()
    }
}

impl OverlayEngine for RecordingEngine {
    fn resolve(
        &self,
        fs: &MemoryFs,
        entry: &NormalizedPath,
        options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>> {
        self.calls.lock().unwrap().push(Call {
            fs: fs.clone(),
            entry: entry.clone(),
            options: *options,
        });
        Ok(self.objects.clone())
    }
}

/// Always fails with an external error carrying `message`.
#[derive(Debug)]
pub struct FailingEngine {
    pub message: String,
}

impl FailingEngine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl OverlayEngine for FailingEngine {
    fn resolve(
        &self,
        _fs: &MemoryFs,
        _entry: &NormalizedPath,
        _options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>> {
        Err(Error::external(self.message.clone()))
    }
}

/// Build an [`ObjectMap`] from a JSON literal. Panics if it is not an object.
pub fn object(value: serde_json::Value) -> ObjectMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
