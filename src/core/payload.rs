//! Secret payload parsing.
//!
//! String payloads that hold a JSON object or array become structured
//! values. Any other string is a plain-text secret; a JSON string literal
//! is unquoted first. Binary payloads are base64 text decoded to UTF-8 and
//! are never treated as JSON.

use base64::Engine;
use thiserror::Error;
use tracing::trace;

use crate::core::domain::SecretValue;
use crate::core::store::SecretPayload;

/// A payload that cannot be turned into a secret value.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("payload has neither a string nor a binary value")]
    Empty,

    #[error("binary value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("binary value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Turn a fetched payload into a [`SecretValue`].
///
/// When both fields are present the string value wins.
///
/// # Errors
///
/// Returns `PayloadError` for an empty payload or an undecodable binary
/// value. A string that fails to parse as JSON is not an error.
pub fn parse_secret_payload(payload: SecretPayload) -> Result<SecretValue, PayloadError> {
    if let Some(text) = payload.string_value {
        return Ok(parse_secret_string(text));
    }

    let encoded = payload.binary_value.ok_or(PayloadError::Empty)?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
    let text = String::from_utf8(bytes)?;
    trace!(len = text.len(), "decoded binary secret");
    Ok(SecretValue::Text(text))
}

/// Interpret a string secret.
///
/// A JSON string literal yields its unquoted contents. Numbers, booleans,
/// `null` and unparsable text keep the original text.
pub fn parse_secret_string(text: String) -> SecretValue {
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) if value.is_object() || value.is_array() => {
            trace!(len = text.len(), "parsed structured secret");
            SecretValue::Json { raw: text, value }
        }
        Ok(serde_json::Value::String(inner)) => SecretValue::Text(inner),
        _ => SecretValue::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string(s: &str) -> SecretPayload {
        SecretPayload::string(s)
    }

    #[test]
    fn test_json_object_string() {
        let value = parse_secret_payload(string(r#"{"a":"b"}"#)).unwrap();
        assert_eq!(value.as_object().unwrap()["a"], json!("b"));
        assert_eq!(value.as_text(), r#"{"a":"b"}"#);
    }

    #[test]
    fn test_multiple_keys() {
        let value =
            parse_secret_payload(string(r#"{"secret1": "secretvalue1", "secret2": "secretvalue2"}"#))
                .unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map["secret1"], json!("secretvalue1"));
        assert_eq!(map["secret2"], json!("secretvalue2"));
    }

    #[test]
    fn test_plain_string_is_unchanged() {
        assert_eq!(
            parse_secret_payload(string("youcantseeme")).unwrap(),
            SecretValue::Text("youcantseeme".into())
        );
    }

    #[test]
    fn test_json_scalars_stay_text() {
        for raw in ["123", "true", "null", "  {broken"] {
            assert_eq!(
                parse_secret_payload(string(raw)).unwrap(),
                SecretValue::Text(raw.into()),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_json_string_literal_is_unquoted() {
        assert_eq!(
            parse_secret_payload(string("\"quoted\"")).unwrap(),
            SecretValue::Text("quoted".into())
        );
        assert_eq!(
            parse_secret_payload(string(r#""line\nbreak""#)).unwrap(),
            SecretValue::Text("line\nbreak".into())
        );
    }

    #[test]
    fn test_binary_is_base64_utf8() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("hello");
        assert_eq!(
            parse_secret_payload(SecretPayload::binary(encoded)).unwrap(),
            SecretValue::Text("hello".into())
        );
    }

    #[test]
    fn test_binary_json_is_not_parsed() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(r#"{"a":"b"}"#);
        let value = parse_secret_payload(SecretPayload::binary(encoded)).unwrap();
        assert!(value.as_object().is_none());
    }

    #[test]
    fn test_invalid_binary() {
        assert!(matches!(
            parse_secret_payload(SecretPayload::binary("***")),
            Err(PayloadError::Base64(_))
        ));

        let not_utf8 = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe]);
        assert!(matches!(
            parse_secret_payload(SecretPayload::binary(not_utf8)),
            Err(PayloadError::Utf8(_))
        ));
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(
            parse_secret_payload(SecretPayload::default()),
            Err(PayloadError::Empty)
        ));
    }
}
