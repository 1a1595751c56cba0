//! Schema-free resolved objects

use serde_yaml::Value as YamlValue;

/// One resolved object as a plain key-value map.
pub type ObjectMap = serde_json::Map<String, serde_json::Value>;

/// Convert a YAML tree into a JSON tree.
///
/// Mapping keys that are not strings are rendered to their scalar string
/// form; keys that are collections are dropped. Tags are discarded.
pub fn yaml_to_json(value: &YamlValue) -> serde_json::Value {
    match value {
        YamlValue::Null => serde_json::Value::Null,
        YamlValue::Bool(b) => serde_json::Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                serde_json::Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            } else {
                serde_json::Value::Null
            }
        }
        YamlValue::String(s) => serde_json::Value::String(s.clone()),
        YamlValue::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(map) => {
            let mut object = ObjectMap::new();
            for (key, value) in map {
                if let Some(key) = scalar_key(key) {
                    object.insert(key, yaml_to_json(value));
                }
            }
            serde_json::Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn scalar_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => scalar_key(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_conversion() {
        let yaml: YamlValue =
            serde_yaml::from_str("metadata:\n  name: web\n  labels:\n    tier: front\nspec:\n  replicas: 3\n  ports: [80, 443]\n")
                .unwrap();
        assert_eq!(
            yaml_to_json(&yaml),
            json!({
                "metadata": {"name": "web", "labels": {"tier": "front"}},
                "spec": {"replicas": 3, "ports": [80, 443]}
            })
        );
    }

    #[test]
    fn test_non_string_keys() {
        let yaml: YamlValue = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        assert_eq!(yaml_to_json(&yaml), json!({"1": "one", "true": "yes"}));
    }
}
