//! Output rendering

use overlay_core::{MemoryFs, Object};

use crate::error::Result;

/// Render objects as a `---` separated YAML stream.
pub fn yaml_stream(objects: &[Object]) -> Result<String> {
    let mut out = String::new();
    for object in objects {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(object)?);
    }
    Ok(out)
}

/// Render objects as a pretty JSON array.
pub fn json_array(objects: &[Object]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(objects)?;
    out.push('\n');
    Ok(out)
}

/// List every file in the store, optionally followed by its content.
pub fn file_listing(fs: &MemoryFs, contents: bool) -> String {
    let mut out = String::new();
    for (path, data) in fs.files() {
        out.push_str(path.as_str());
        out.push('\n');
        if contents {
            let text = String::from_utf8_lossy(data);
            for line in text.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}
