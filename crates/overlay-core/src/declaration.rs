//! Adds the generated manifest to the overlay declaration.
//!
//! The declaration is parsed as a generic ordered mapping rather than a typed
//! schema, so every key other than `resources` survives the rewrite
//! untouched and in its original position.

use overlay_fs::{MemoryFs, NormalizedPath};
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::constants::{DECLARATION_FILE, GENERATED_FILE, RESOURCES_KEY};
use crate::{Error, Result};

/// What [`augment_declaration`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmentation {
    /// `manifests.yaml` was appended and the declaration rewritten
    Appended,
    /// The declaration already listed `manifests.yaml`; nothing was written
    AlreadyPresent,
    /// The declaration could not be parsed and was left as is
    Skipped { reason: String },
}

/// Make sure `<base>/kustomization.yaml` lists `manifests.yaml` exactly once.
///
/// A declaration that does not parse as a mapping is left untouched and
/// reported as [`Augmentation::Skipped`]; the engine gets to report the
/// real problem. Failing to read or write the file is fatal.
pub fn augment_declaration(fs: &mut MemoryFs, base: &NormalizedPath) -> Result<Augmentation> {
    let path = base.join(DECLARATION_FILE);
    let bytes = fs.read_file(&path).map_err(Error::DeclarationRead)?;

    let mut document = match parse_mapping(bytes) {
        Ok(document) => document,
        Err(reason) => {
            tracing::warn!(%path, %reason, "Declaration is not a valid mapping; not adding {GENERATED_FILE}");
            return Ok(Augmentation::Skipped { reason });
        }
    };

    let mut resources = string_list(document.get(RESOURCES_KEY));
    if resources.iter().any(|r| r == GENERATED_FILE) {
        tracing::debug!(%path, "Declaration already lists {GENERATED_FILE}");
        return Ok(Augmentation::AlreadyPresent);
    }
    resources.push(GENERATED_FILE.to_string());

    let list = resources.into_iter().map(YamlValue::String).collect();
    document.insert(YamlValue::from(RESOURCES_KEY), YamlValue::Sequence(list));

    let rendered =
        serde_yaml::to_string(&YamlValue::Mapping(document)).map_err(Error::DeclarationSerialize)?;
    fs.write_file(&path, rendered).map_err(Error::DeclarationWrite)?;
    tracing::debug!(%path, "Appended {GENERATED_FILE} to declaration resources");
    Ok(Augmentation::Appended)
}

/// Parse the first YAML document as a mapping. Later documents are ignored.
fn parse_mapping(bytes: &[u8]) -> std::result::Result<Mapping, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }
    let Some(document) = serde_yaml::Deserializer::from_slice(bytes).next() else {
        return Ok(Mapping::new());
    };
    match YamlValue::deserialize(document).map_err(|e| e.to_string())? {
        YamlValue::Null => Ok(Mapping::new()),
        YamlValue::Mapping(mapping) => Ok(mapping),
        _ => Err("document is not a mapping".to_string()),
    }
}

/// Read a value as a list of strings.
///
/// Scalars inside a sequence are rendered to their string form; nulls and
/// nested collections are dropped. A bare string is a one-element list and
/// anything else is empty.
fn string_list(value: Option<&YamlValue>) -> Vec<String> {
    match value {
        Some(YamlValue::Sequence(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(YamlValue::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn scalar_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Tagged(tagged) => scalar_string(&tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}
