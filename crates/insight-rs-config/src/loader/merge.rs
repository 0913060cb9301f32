//! JSON merge helpers for layered configuration.

use serde_json::Value;

/// Merge overlay values into the base, recursively overriding objects.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_json_values;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_and_arrays_replace() {
        let mut base = json!({
            "server": { "host": "127.0.0.1", "cors_origins": ["http://a"] },
            "agent": { "max_iterations": 15 },
        });
        let overlay = json!({
            "server": { "port": 9000, "cors_origins": ["http://b"] },
        });

        merge_json_values(&mut base, &overlay);

        assert_eq!(
            base,
            json!({
                "server": {
                    "host": "127.0.0.1",
                    "port": 9000,
                    "cors_origins": ["http://b"],
                },
                "agent": { "max_iterations": 15 },
            })
        );
    }
}
