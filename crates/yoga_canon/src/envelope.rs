//! Envelope unwrapping.

use serde_json::Value;

pub const ENVELOPE_KEY: &str = "data";
const MAX_DESCENTS: usize = 2;

/// Strip at most two levels of `{ "data": { ... } }` wrapping.
///
/// Anything that is not an object, or whose `data` is not an object, is
/// already flat and comes back unchanged.
pub fn unwrap_envelope(raw: &Value) -> &Value {
    let mut current = raw;
    for _ in 0..MAX_DESCENTS {
        match current.get(ENVELOPE_KEY) {
            Some(inner) if inner.is_object() => current = inner,
            _ => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_payload_unchanged() {
        let flat = json!({ "name": "x" });
        assert_eq!(unwrap_envelope(&flat), &flat);
    }

    #[test]
    fn test_single_and_double_envelope() {
        let inner = json!({ "name": "x" });
        assert_eq!(unwrap_envelope(&json!({ "data": inner.clone() })), &inner);
        assert_eq!(unwrap_envelope(&json!({ "data": { "data": inner.clone() } })), &inner);
    }

    #[test]
    fn test_triple_envelope_stops_after_two() {
        let raw = json!({ "data": { "data": { "data": { "name": "x" } } } });
        assert_eq!(unwrap_envelope(&raw), &json!({ "data": { "name": "x" } }));
    }

    #[test]
    fn test_non_object_data_is_flat() {
        let raw = json!({ "data": [1, 2, 3], "success": true });
        assert_eq!(unwrap_envelope(&raw), &raw);
        assert_eq!(unwrap_envelope(&json!("text")), &json!("text"));
    }
}
