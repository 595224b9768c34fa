//! Resolved secret values.

use serde_json::{Map, Value};

/// A secret value after payload parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretValue {
    /// Plain text, written as-is.
    Text(String),
    /// Text that parsed as a JSON object or array.
    Json { raw: String, value: Value },
}

impl SecretValue {
    /// The original text of the secret.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Json { raw, .. } => raw,
        }
    }

    /// The key/value map of a JSON object secret.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Json { value, .. } => value.as_object(),
            Self::Text(_) => None,
        }
    }
}

/// Text written for a single key of a compound secret.
///
/// JSON strings are written verbatim, anything else as compact JSON.
pub fn render_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
