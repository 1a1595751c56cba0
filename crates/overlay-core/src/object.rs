//! Resolved objects handed back to callers

use overlay_engine::ObjectMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One fully resolved resource.
///
/// A thin wrapper over the engine's key-value map with accessors for the
/// identifying fields. Serializes as the bare map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object {
    object: ObjectMap,
}

impl Object {
    pub fn new(object: ObjectMap) -> Self {
        Self { object }
    }

    pub fn api_version(&self) -> Option<&str> {
        self.object.get("apiVersion").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.object.get("kind").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata("name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata("namespace")
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.object.get(key)
    }

    pub fn as_map(&self) -> &ObjectMap {
        &self.object
    }

    pub fn into_map(self) -> ObjectMap {
        self.object
    }

    fn metadata(&self, field: &str) -> Option<&str> {
        self.object
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
    }
}

impl From<ObjectMap> for Object {
    fn from(object: ObjectMap) -> Self {
        Self::new(object)
    }
}
