//! Deep-merge helpers for applying user overrides

use serde_json::{Map, Value};

/// Recursive merge: objects merge key-by-key, anything else from the
/// overlay replaces the base. Nested fields absent from the overlay are
/// preserved.
pub fn deep_merge(base: Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                base_map.insert(key.clone(), merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Shallow merge of two path items, keyed by HTTP method (plus any
/// non-method keys such as `parameters`). The overlay's entry wins per
/// key; other methods from the base survive.
pub fn merge_path_items(base: Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                base_map.insert(key.clone(), value.clone());
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Empty JSON object.
pub fn empty_object() -> Value {
    Value::Object(Map::new())
}
