//! A declarative engine that only understands `resources` lists.
//!
//! Each entry of a declaration's `resources` list is either a YAML file
//! (possibly multi-document) or a directory holding its own declaration,
//! which is resolved recursively. Entries are emitted in declaration order.
//! Patches, generators and every other transformation are rejected rather
//! than silently ignored.

use std::collections::HashSet;

use overlay_fs::{MemoryFs, NormalizedPath};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

use crate::{
    DECLARATION_FILE, EngineOptions, Error, LoadRestrictions, ObjectMap, OverlayEngine,
    PluginPolicy, Result, yaml_to_json,
};

/// Declaration fields that only carry type information.
const PASSIVE_FIELDS: &[&str] = &["apiVersion", "kind"];

/// Declaration fields that run executable extensions.
const PLUGIN_FIELDS: &[&str] = &["generators", "transformers", "validators"];

const RESOURCES_FIELD: &str = "resources";

/// Engine that concatenates the resources an overlay lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceListEngine;

impl ResourceListEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OverlayEngine for ResourceListEngine {
    fn resolve(
        &self,
        fs: &MemoryFs,
        entry: &NormalizedPath,
        options: &EngineOptions,
    ) -> Result<Vec<ObjectMap>> {
        let mut run = Run {
            fs,
            options,
            stack: Vec::new(),
        };
        let objects = run.build(entry)?;
        check_unique_ids(&objects)?;
        tracing::debug!(%entry, count = objects.len(), "Resolved resource list");
        Ok(objects)
    }
}

/// State for one resolution.
struct Run<'a> {
    fs: &'a MemoryFs,
    options: &'a EngineOptions,
    /// Overlay directories currently being built, outermost first
    stack: Vec<NormalizedPath>,
}

impl Run<'_> {
    fn build(&mut self, dir: &NormalizedPath) -> Result<Vec<ObjectMap>> {
        if self.stack.contains(dir) {
            return Err(Error::Cycle { path: dir.clone() });
        }
        let declaration = dir.join(DECLARATION_FILE);
        if !self.fs.is_file(&declaration) {
            return Err(Error::MissingDeclaration { dir: dir.clone() });
        }

        let references = self.read_declaration(&declaration)?;
        self.stack.push(dir.clone());

        let mut objects = Vec::new();
        for reference in references {
            if is_remote(&reference) {
                return Err(Error::RemoteResource { reference });
            }
            let target = dir.join(&reference);
            if self.fs.is_dir(&target) {
                tracing::trace!(%target, "Building base");
                objects.extend(self.build(&target)?);
            } else if self.fs.is_file(&target) {
                if self.options.load_restrictions == LoadRestrictions::RootOnly
                    && !target.starts_with(dir)
                {
                    return Err(Error::OutsideRoot {
                        path: target,
                        root: dir.clone(),
                    });
                }
                objects.extend(self.load_documents(&target)?);
            } else {
                return Err(Error::MissingResource {
                    reference,
                    root: dir.clone(),
                });
            }
        }

        self.stack.pop();
        Ok(objects)
    }

    /// Validate a declaration and return its resource references.
    fn read_declaration(&self, path: &NormalizedPath) -> Result<Vec<String>> {
        let text = self.fs.read_to_string(path)?;
        let invalid = |message: String| Error::InvalidDeclaration {
            path: path.clone(),
            message,
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let Some(document) = serde_yaml::Deserializer::from_str(&text).next() else {
            return Ok(Vec::new());
        };
        let mapping = match YamlValue::deserialize(document).map_err(|e| invalid(e.to_string()))? {
            YamlValue::Null => return Ok(Vec::new()),
            YamlValue::Mapping(mapping) => mapping,
            _ => return Err(invalid("document is not a mapping".into())),
        };

        let mut references = Vec::new();
        for (key, value) in &mapping {
            let field = key
                .as_str()
                .ok_or_else(|| invalid("non-string key".into()))?;
            if field == RESOURCES_FIELD {
                references = string_list(value).ok_or_else(|| {
                    invalid("'resources' must be a list of strings".into())
                })?;
            } else if PASSIVE_FIELDS.contains(&field) || is_empty(value) {
                continue;
            } else if PLUGIN_FIELDS.contains(&field)
                && self.options.plugins == PluginPolicy::Disabled
            {
                return Err(Error::PluginsDisabled {
                    field: field.to_string(),
                    path: path.clone(),
                });
            } else {
                return Err(Error::UnsupportedField {
                    field: field.to_string(),
                    path: path.clone(),
                });
            }
        }
        Ok(references)
    }

    fn load_documents(&self, path: &NormalizedPath) -> Result<Vec<ObjectMap>> {
        let text = self.fs.read_to_string(path)?;
        let invalid = |message: String| Error::InvalidResource {
            path: path.clone(),
            message,
        };

        let mut objects = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&text) {
            let value = YamlValue::deserialize(document).map_err(|e| invalid(e.to_string()))?;
            let serde_json::Value::Object(object) = yaml_to_json(&value) else {
                if value.is_null() {
                    continue;
                }
                return Err(invalid("document is not a mapping".into()));
            };
            expand_list(object, &mut objects).map_err(invalid)?;
        }
        if objects.iter().any(|o| resource_id(o).is_none()) {
            return Err(invalid("resource is missing 'kind' or 'metadata.name'".into()));
        }
        Ok(objects)
    }
}

/// Push `object`, or its `items` when it is a `*List` kind.
fn expand_list(mut object: ObjectMap, out: &mut Vec<ObjectMap>) -> std::result::Result<(), String> {
    let is_list = object
        .get("kind")
        .and_then(|k| k.as_str())
        .is_some_and(|k| k.ends_with("List"));
    if !is_list {
        out.push(object);
        return Ok(());
    }
    let items = match object.remove("items") {
        Some(serde_json::Value::Array(items)) => items,
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(_) => return Err("'items' of a list must be a sequence".into()),
    };
    for item in items {
        match item {
            serde_json::Value::Object(item) => out.push(item),
            _ => return Err("list item is not a mapping".into()),
        }
    }
    Ok(())
}

fn check_unique_ids(objects: &[ObjectMap]) -> Result<()> {
    let mut seen = HashSet::new();
    for id in objects.iter().filter_map(resource_id) {
        if !seen.insert(id.clone()) {
            return Err(Error::DuplicateResource { id });
        }
    }
    Ok(())
}

/// `apiVersion/kind/namespace/name`, the identity two resources may not share.
fn resource_id(object: &ObjectMap) -> Option<String> {
    fn text(v: Option<&serde_json::Value>) -> &str {
        v.and_then(|v| v.as_str()).unwrap_or("")
    }
    let kind = text(object.get("kind"));
    let metadata = object.get("metadata");
    let name = text(metadata.and_then(|m| m.get("name")));
    if kind.is_empty() || name.is_empty() {
        return None;
    }
    let namespace = text(metadata.and_then(|m| m.get("namespace")));
    let namespace = if namespace.is_empty() { "~X" } else { namespace };
    Some(format!(
        "{}/{}/{}/{}",
        text(object.get("apiVersion")),
        kind,
        namespace,
        name
    ))
}

fn string_list(value: &YamlValue) -> Option<Vec<String>> {
    match value {
        YamlValue::Null => Some(Vec::new()),
        YamlValue::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

fn is_empty(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => true,
        YamlValue::String(s) => s.is_empty(),
        YamlValue::Sequence(s) => s.is_empty(),
        YamlValue::Mapping(m) => m.is_empty(),
        _ => false,
    }
}

fn is_remote(reference: &str) -> bool {
    reference.contains("://") || reference.starts_with("github.com/") || reference.starts_with("git@")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(files: &[(&str, &str)]) -> MemoryFs {
        let mut fs = MemoryFs::new();
        for (path, content) in files {
            fs.add_file(&NormalizedPath::new(path), *content).unwrap();
        }
        fs
    }

    fn names(objects: &[ObjectMap]) -> Vec<String> {
        objects
            .iter()
            .map(|o| o["metadata"]["name"].as_str().unwrap().to_string())
            .collect()
    }

    fn resolve(fs: &MemoryFs, entry: &str) -> Result<Vec<ObjectMap>> {
        ResourceListEngine.resolve(fs, &NormalizedPath::new(entry), &EngineOptions::default())
    }

    const CM_A: &str = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: a\n";
    const CM_B: &str = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: b\n";

    #[test]
    fn test_resources_in_declaration_order() {
        let fs = store(&[
            ("kustomization.yaml", "resources:\n- b.yaml\n- a.yaml\n"),
            ("a.yaml", CM_A),
            ("b.yaml", CM_B),
        ]);
        assert_eq!(names(&resolve(&fs, "/").unwrap()), vec!["b", "a"]);
    }

    #[test]
    fn test_multi_document_and_empty_documents() {
        let all = format!("---\n{CM_A}---\n# nothing here\n---\n{CM_B}");
        let fs = store(&[
            ("kustomization.yaml", "resources: [all.yaml]\n"),
            ("all.yaml", all.as_str()),
        ]);
        assert_eq!(names(&resolve(&fs, "/").unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_list_kind_is_expanded() {
        let fs = store(&[
            ("kustomization.yaml", "resources: [list.yaml]\n"),
            (
                "list.yaml",
                "apiVersion: v1\nkind: List\nitems:\n- kind: ConfigMap\n  metadata: {name: x}\n- kind: Secret\n  metadata: {name: y}\n",
            ),
        ]);
        assert_eq!(names(&resolve(&fs, "/").unwrap()), vec!["x", "y"]);
    }

    #[test]
    fn test_base_directories_are_recursed() {
        let fs = store(&[
            ("overlays/prod/kustomization.yaml", "resources:\n- ../../base\n- extra.yaml\n"),
            ("overlays/prod/extra.yaml", CM_B),
            ("base/kustomization.yaml", "resources: [cm.yaml]\n"),
            ("base/cm.yaml", CM_A),
        ]);
        assert_eq!(names(&resolve(&fs, "overlays/prod").unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_root_only_rejects_files_outside_overlay() {
        let fs = store(&[
            ("overlays/prod/kustomization.yaml", "resources: [../shared.yaml]\n"),
            ("overlays/shared.yaml", CM_A),
        ]);
        let err = resolve(&fs, "overlays/prod").unwrap_err();
        assert!(matches!(err, Error::OutsideRoot { .. }));

        let relaxed = EngineOptions {
            load_restrictions: LoadRestrictions::None,
            ..EngineOptions::default()
        };
        let objects = ResourceListEngine
            .resolve(&fs, &NormalizedPath::new("overlays/prod"), &relaxed)
            .unwrap();
        assert_eq!(names(&objects), vec!["a"]);
    }

    #[test]
    fn test_plugins_disabled() {
        let fs = store(&[(
            "kustomization.yaml",
            "resources: []\ngenerators:\n- gen.yaml\n",
        )]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::PluginsDisabled { field, .. } if field == "generators"
        ));
    }

    #[test]
    fn test_merge_language_is_unsupported() {
        let fs = store(&[(
            "kustomization.yaml",
            "resources: []\npatches:\n- path: p.yaml\n",
        )]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::UnsupportedField { field, .. } if field == "patches"
        ));
    }

    #[test]
    fn test_empty_fields_are_ignored() {
        let fs = store(&[(
            "kustomization.yaml",
            "apiVersion: kustomize.config.k8s.io/v1beta1\nkind: Kustomization\npatches: []\nnamespace: \"\"\n",
        )]);
        assert!(resolve(&fs, "/").unwrap().is_empty());
    }

    #[test]
    fn test_missing_resource() {
        let fs = store(&[("kustomization.yaml", "resources: [nope.yaml]\n")]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::MissingResource { reference, .. } if reference == "nope.yaml"
        ));
    }

    #[test]
    fn test_missing_declaration() {
        let fs = store(&[("a.yaml", CM_A)]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::MissingDeclaration { .. }
        ));
    }

    #[test]
    fn test_duplicate_ids() {
        let fs = store(&[
            ("kustomization.yaml", "resources: [a.yaml, again.yaml]\n"),
            ("a.yaml", CM_A),
            ("again.yaml", CM_A),
        ]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::DuplicateResource { .. }
        ));
    }

    #[test]
    fn test_same_name_in_different_namespaces_is_allowed() {
        let fs = store(&[
            ("kustomization.yaml", "resources: [both.yaml]\n"),
            (
                "both.yaml",
                "kind: ConfigMap\nmetadata: {name: a, namespace: one}\n---\nkind: ConfigMap\nmetadata: {name: a, namespace: two}\n",
            ),
        ]);
        assert_eq!(resolve(&fs, "/").unwrap().len(), 2);
    }

    #[test]
    fn test_cycle() {
        let fs = store(&[
            ("a/kustomization.yaml", "resources: [../b]\n"),
            ("b/kustomization.yaml", "resources: [../a]\n"),
        ]);
        assert!(matches!(resolve(&fs, "a").unwrap_err(), Error::Cycle { .. }));
    }

    #[test]
    fn test_remote_resources_rejected() {
        let fs = store(&[(
            "kustomization.yaml",
            "resources: [\"https://github.com/org/repo//base\"]\n",
        )]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::RemoteResource { .. }
        ));
    }

    #[test]
    fn test_unparsable_declaration() {
        let fs = store(&[("kustomization.yaml", "resources: [unclosed\n")]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::InvalidDeclaration { .. }
        ));
    }

    #[test]
    fn test_declaration_reads_first_document_only() {
        let fs = store(&[
            ("kustomization.yaml", "resources: [a.yaml]\n---\npatches: [p.yaml]\n"),
            ("a.yaml", CM_A),
        ]);
        assert_eq!(names(&resolve(&fs, "/").unwrap()), vec!["a"]);
    }

    #[test]
    fn test_comment_only_declaration_is_empty() {
        let fs = store(&[("kustomization.yaml", "# empty\n")]);
        assert!(resolve(&fs, "/").unwrap().is_empty());
    }

    #[test]
    fn test_resource_without_name() {
        let fs = store(&[
            ("kustomization.yaml", "resources: [bad.yaml]\n"),
            ("bad.yaml", "kind: ConfigMap\ndata: {}\n"),
        ]);
        assert!(matches!(
            resolve(&fs, "/").unwrap_err(),
            Error::InvalidResource { .. }
        ));
    }
}
