//! Cache key derivation from request parameters.
//!
//! Two structurally equal parameter objects must address the same cache
//! entry regardless of field order, so parameters are serialized to a
//! canonical form (object keys sorted recursively, arrays kept in order)
//! before being digested. The SHA-256 digest is appended to a readable
//! `{namespace}{operation}_` prefix so prefix-based clearing still works.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{PathError, Result};

/// Derive the storage key for `(namespace, operation, params)`.
///
/// Fails with [`PathError::CacheKey`] when the parameters cannot be
/// represented as JSON (e.g. a map with non-string keys). Callers treat
/// that as "uncacheable", not as a failed operation.
pub fn cache_key<P: Serialize>(namespace: &str, operation: &str, params: &P) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| PathError::CacheKey(e.to_string()))?;
    let canonical = canonicalize(&value);
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{namespace}{operation}_{digest:x}"))
}

/// Render `value` as JSON with object keys sorted recursively.
///
/// serde_json's default map already iterates in key order, but relying on
/// that would silently break if any crate in the build enables the
/// `preserve_order` feature. Sorting here keeps the key deterministic
/// under either backing.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        // Display for string values produces the JSON-escaped quoted form.
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(k, _)| k.as_str());
            out.push('{');
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*k).clone()).to_string());
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_key_is_deterministic() {
        let params = json!({"category": "tech", "location": "Remote"});
        let k1 = cache_key("analytics_", "demand", &params).unwrap();
        let k2 = cache_key("analytics_", "demand", &params).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_key_keeps_readable_prefix() {
        let key = cache_key("ai_", "recommend", &json!({"skills": ["Rust"]})).unwrap();
        assert!(key.starts_with("ai_recommend_"), "got {key}");
    }

    #[test]
    fn test_field_order_does_not_change_key() {
        let mut forward = Map::new();
        forward.insert("a".into(), json!(1));
        forward.insert("b".into(), json!(2));

        let mut reversed = Map::new();
        reversed.insert("b".into(), json!(2));
        reversed.insert("a".into(), json!(1));

        assert_eq!(
            cache_key("analytics_", "demand", &Value::Object(forward)).unwrap(),
            cache_key("analytics_", "demand", &Value::Object(reversed)).unwrap(),
        );
    }

    #[test]
    fn test_nested_objects_are_canonicalized() {
        let mut inner_a = Map::new();
        inner_a.insert("x".into(), json!(1));
        inner_a.insert("y".into(), json!([1, 2]));
        let mut inner_b = Map::new();
        inner_b.insert("y".into(), json!([1, 2]));
        inner_b.insert("x".into(), json!(1));

        let a = json!({"outer": Value::Object(inner_a)});
        let b = json!({"outer": Value::Object(inner_b)});
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_array_order_is_significant() {
        let k1 = cache_key("ai_", "recommend", &json!({"skills": ["a", "b"]})).unwrap();
        let k2 = cache_key("ai_", "recommend", &json!({"skills": ["b", "a"]})).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_different_values_produce_different_keys() {
        let k1 = cache_key("analytics_", "demand", &json!({"category": "tech"})).unwrap();
        let k2 = cache_key("analytics_", "demand", &json!({"category": "teaching"})).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_different_operations_produce_different_keys() {
        let params = json!({"category": "tech"});
        let k1 = cache_key("analytics_", "demand", &params).unwrap();
        let k2 = cache_key("analytics_", "salary", &params).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_canonical_string_escaping() {
        let value = json!({"q": "a \"quoted\" term"});
        assert_eq!(canonicalize(&value), r#"{"q":"a \"quoted\" term"}"#);
    }

    #[test]
    fn test_uncanonicalizable_params_fail_with_cache_key_error() {
        use std::collections::HashMap;
        // Tuple keys cannot be represented as JSON object keys.
        let mut params: HashMap<(u8, u8), u8> = HashMap::new();
        params.insert((1, 2), 3);
        let err = cache_key("ai_", "recommend", &params).unwrap_err();
        assert!(matches!(err, PathError::CacheKey(_)), "got {err:?}");
    }
}
