//! Per-layer schema checks.
//!
//! Each layer is checked before merging so errors name the file they came
//! from. Absent keys are fine; serde defaults fill them in later.

use crate::ConfigError;
use serde_json::Value;

/// Expected shape of a config value.
enum Shape {
    Str,
    Bool,
    Uint,
    Port,
    StrList,
    OneOf(&'static [&'static str]),
    Object(&'static [(&'static str, Shape)]),
}

const OUTPUT_POLICY: &[(&str, Shape)] = &[
    ("max_string_bytes", Shape::Uint),
    ("max_array_len", Shape::Uint),
    ("max_object_entries", Shape::Uint),
    ("redact_keys", Shape::StrList),
    ("redact_values", Shape::StrList),
    ("replacement", Shape::Str),
];

const ROOT: Shape = Shape::Object(&[
    ("$schema", Shape::Str),
    (
        "server",
        Shape::Object(&[
            ("host", Shape::Str),
            ("port", Shape::Port),
            ("cors_origins", Shape::StrList),
        ]),
    ),
    (
        "model",
        Shape::Object(&[
            ("provider", Shape::OneOf(&["openai", "anthropic"])),
            ("name", Shape::Str),
            ("max_tokens", Shape::Uint),
            ("timeout_secs", Shape::Uint),
        ]),
    ),
    (
        "agent",
        Shape::Object(&[
            ("domain", Shape::OneOf(&["climate", "banking"])),
            ("max_iterations", Shape::Uint),
            ("system_prompt", Shape::Str),
            ("append_system_prompt", Shape::Str),
            ("stream_buffer", Shape::Uint),
        ]),
    ),
    (
        "tools",
        Shape::Object(&[("output_policy", Shape::Object(OUTPUT_POLICY))]),
    ),
    (
        "history",
        Shape::Object(&[("enabled", Shape::Bool), ("path", Shape::Str)]),
    ),
    ("data", Shape::Object(&[("seed", Shape::Uint)])),
]);

/// Validate one layer; errors carry `<layer>:<dotted.path>`.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    check(&ROOT, value, layer, "")
}

fn check(shape: &Shape, value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let fail = |message: String| {
        Err(ConfigError::InvalidField {
            path: format!("{layer}:{}", if path.is_empty() { "root" } else { path }),
            message,
        })
    };
    match shape {
        Shape::Str if value.is_string() => Ok(()),
        Shape::Str => fail("expected string".to_string()),
        Shape::Bool if value.is_boolean() => Ok(()),
        Shape::Bool => fail("expected bool".to_string()),
        Shape::Uint if value.is_u64() => Ok(()),
        Shape::Uint => fail("expected non-negative integer".to_string()),
        Shape::Port => match value.as_u64() {
            Some(port) if port <= u64::from(u16::MAX) => Ok(()),
            _ => fail("expected port number".to_string()),
        },
        Shape::OneOf(allowed) => match value.as_str() {
            Some(text) if allowed.contains(&text) => Ok(()),
            _ => fail(format!("expected one of: {}", allowed.join(", "))),
        },
        Shape::StrList => {
            let Some(items) = value.as_array() else {
                return fail("expected array".to_string());
            };
            for (idx, item) in items.iter().enumerate() {
                check(&Shape::Str, item, layer, &format!("{path}[{idx}]"))?;
            }
            Ok(())
        }
        Shape::Object(fields) => {
            let Some(map) = value.as_object() else {
                return fail("expected object".to_string());
            };
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match fields.iter().find(|(name, _)| name == key) {
                    Some((_, shape)) => check(shape, child, layer, &child_path)?,
                    None => {
                        return Err(ConfigError::InvalidField {
                            path: format!("{layer}:{child_path}"),
                            message: "unknown key".to_string(),
                        });
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_layer_schema;
    use crate::ConfigError;
    use serde_json::json;

    fn field_error(value: serde_json::Value) -> (String, String) {
        match validate_layer_schema(&value, "cwd") {
            Err(ConfigError::InvalidField { path, message }) => (path, message),
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[test]
    fn nested_paths_are_reported() {
        let (path, message) = field_error(json!({ "tools": { "output_policy": { "redact_keys": ["iban", 3] } } }));
        assert_eq!(path, "cwd:tools.output_policy.redact_keys[1]");
        assert_eq!(message, "expected string");
    }

    #[test]
    fn enums_and_ports_are_checked() {
        let (path, message) = field_error(json!({ "agent": { "domain": "weather" } }));
        assert_eq!(path, "cwd:agent.domain");
        assert_eq!(message, "expected one of: climate, banking");
        let (path, _) = field_error(json!({ "server": { "port": 70000 } }));
        assert_eq!(path, "cwd:server.port");
        let (path, _) = field_error(json!([1, 2]));
        assert_eq!(path, "cwd:root");
    }

    #[test]
    fn full_layer_is_accepted() {
        let layer = json!({
            "$schema": "https://example.invalid/insight.json",
            "server": { "host": "0.0.0.0", "port": 8080, "cors_origins": ["http://localhost:3000"] },
            "model": { "provider": "anthropic", "name": "claude", "max_tokens": 2048, "timeout_secs": 30 },
            "agent": { "domain": "banking", "max_iterations": 5, "stream_buffer": 8 },
            "history": { "enabled": true, "path": "/tmp/history" },
            "data": { "seed": 7 },
        });
        assert!(validate_layer_schema(&layer, "cwd").is_ok());
    }
}
