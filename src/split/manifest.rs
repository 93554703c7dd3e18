//! Structured-document sniffing for `kind` / `metadata.name`

use serde_yaml::Value;

/// Identity of a parsed manifest: its `kind` and `metadata.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestId {
    pub kind: String,
    pub name: String,
}

impl ManifestId {
    /// File name synthesized from the identity, e.g. `deployment-web.yaml`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.yaml", self.kind.to_lowercase(), self.name)
    }
}

/// Parse `content` as a YAML mapping.
///
/// Returns `None` when the text is not valid YAML or its root is not a mapping.
pub fn parse_mapping(content: &str) -> Option<Value> {
    let value: Value = serde_yaml::from_str(content).ok()?;
    value.is_mapping().then_some(value)
}

/// Get a non-empty string value from a mapping by key.
fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Extract `kind` and `metadata.name` from a parsed document.
///
/// Only string values count; numbers, booleans and nested structures are
/// ignored so that `name: 42` never produces a file name.
pub fn manifest_id(document: &Value) -> Option<ManifestId> {
    let kind = get_str(document, "kind")?;
    let name = get_str(document.get("metadata")?, "name")?;
    Some(ManifestId {
        kind: kind.to_string(),
        name: name.to_string(),
    })
}

/// Parse `content` and extract its identity in one step.
pub fn identify(content: &str) -> Option<ManifestId> {
    manifest_id(&parse_mapping(content)?)
}
