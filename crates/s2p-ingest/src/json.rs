//! JSON loading.
//!
//! JSON documents get no line annotation; property order is preserved so the
//! built columnar schema keeps the declaration order of the source.

use serde_yaml::{Mapping, Value};

use crate::error::Result;

/// Parse JSON text into the schema value tree.
pub fn load_json(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(json_to_node(json))
}

fn json_to_node(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                Value::Number(int.into())
            } else if let Some(int) = n.as_u64() {
                Value::Number(int.into())
            } else {
                n.as_f64()
                    .map_or(Value::Null, |float| Value::Number(float.into()))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(json_to_node).collect())
        }
        serde_json::Value::Object(entries) => {
            let mut map = Mapping::new();
            for (key, value) in entries {
                map.insert(Value::String(key), json_to_node(value));
            }
            Value::Mapping(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let doc = load_json(r#"{"i": 3, "f": 2.5, "b": false, "n": null, "s": "x"}"#).unwrap();
        assert_eq!(doc.get("i").and_then(Value::as_i64), Some(3));
        assert_eq!(doc.get("f").and_then(Value::as_f64), Some(2.5));
        assert_eq!(doc.get("b").and_then(Value::as_bool), Some(false));
        assert!(doc.get("n").is_some_and(Value::is_null));
        assert_eq!(doc.get("s").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_property_order_is_preserved() {
        let doc = load_json(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .iter()
            .filter_map(|(key, _)| key.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_nested_arrays_and_objects() {
        let doc = load_json(r#"{"items": [{"name": "a"}, {"name": "b"}]}"#).unwrap();
        let items = doc.get("items").and_then(Value::as_sequence).unwrap();
        assert_eq!(items[1].get("name").and_then(Value::as_str), Some("b"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(load_json("{not json").is_err());
    }
}
