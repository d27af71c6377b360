//! Body-shape normalization.

use serde_json::Value;
use thiserror::Error;

/// The structured form of an inbound payload after coercion, forwarded
/// uniformly to collaborators.
pub type NormalizedRequest = Value;

/// A request body the normalizer refuses to forward.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("body is not valid UTF-8")]
    NotUtf8,

    #[error("body is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("type in body not recognized")]
    UnrecognizedShape,
}

/// Normalize a raw request body.
///
/// Bytes are decoded as UTF-8 and parsed as JSON. An object passes through
/// unchanged. A top-level string is re-serialized as the JSON encoding of
/// itself rather than parsed -- inconsistent with the byte path, but kept
/// for compatibility with what collaborators already receive; unifying both
/// non-object cases to decode-then-parse is the obvious alternative. Any
/// other shape is refused.
pub fn normalize(body: &[u8]) -> Result<NormalizedRequest, InputError> {
    let text = std::str::from_utf8(body).map_err(|_| InputError::NotUtf8)?;
    let value: Value = serde_json::from_str(text).map_err(InputError::Malformed)?;

    match value {
        Value::Object(_) => Ok(value),
        Value::String(_) => Ok(Value::String(value.to_string())),
        _ => Err(InputError::UnrecognizedShape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_passes_through() {
        let body = br#"{"ctx": {"workflowID": "wf-1"}, "data": {"k": "v"}}"#;
        let normalized = normalize(body).unwrap();
        assert_eq!(
            normalized,
            json!({"ctx": {"workflowID": "wf-1"}, "data": {"k": "v"}})
        );
    }

    #[test]
    fn test_string_is_reencoded_not_parsed() {
        let normalized = normalize(br#""hello""#).unwrap();
        assert_eq!(normalized, Value::String(r#""hello""#.to_string()));
    }

    #[test]
    fn test_string_reencoding_escapes() {
        let normalized = normalize(br#""say \"hi\"""#).unwrap();
        assert_eq!(normalized, Value::String(r#""say \"hi\"""#.to_string()));
    }

    #[test]
    fn test_unrecognized_shapes_are_refused() {
        for body in [&b"[1, 2, 3]"[..], b"42", b"3.14", b"true", b"null"] {
            let err = normalize(body).unwrap_err();
            assert!(
                matches!(err, InputError::UnrecognizedShape),
                "{:?} should be refused",
                String::from_utf8_lossy(body)
            );
            assert_eq!(err.to_string(), "type in body not recognized");
        }
    }

    #[test]
    fn test_invalid_utf8_is_an_input_error() {
        assert!(matches!(
            normalize(&[0xff, 0xfe, 0xfd]),
            Err(InputError::NotUtf8)
        ));
    }

    #[test]
    fn test_unparsable_text_is_an_input_error() {
        assert!(matches!(
            normalize(b"not json at all"),
            Err(InputError::Malformed(_))
        ));
        assert!(matches!(normalize(b""), Err(InputError::Malformed(_))));
    }
}
