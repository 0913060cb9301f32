//! Truncation and redaction applied to tool observations.

use insight_rs_config::ToolOutputPolicyConfig;
use serde_json::Value;

/// Policy that redacts and truncates tool outputs before they are recorded
/// in a trace or returned to the model.
#[derive(Debug, Clone)]
pub struct ToolOutputPolicy {
    /// Maximum size of string fields in bytes.
    pub max_string_bytes: usize,
    /// Maximum number of elements in arrays.
    pub max_array_len: usize,
    /// Maximum number of object entries.
    pub max_object_entries: usize,
    /// Key names whose values should be redacted.
    pub redact_keys: Vec<String>,
    /// Value patterns that should be redacted.
    pub redact_values: Vec<String>,
    /// Replacement text for redacted values.
    pub replacement: String,
}

impl Default for ToolOutputPolicy {
    fn default() -> Self {
        Self::from(&ToolOutputPolicyConfig::default())
    }
}

impl From<&ToolOutputPolicyConfig> for ToolOutputPolicy {
    fn from(config: &ToolOutputPolicyConfig) -> Self {
        Self {
            max_string_bytes: config.max_string_bytes,
            max_array_len: config.max_array_len,
            max_object_entries: config.max_object_entries,
            redact_keys: config.redact_keys.clone(),
            redact_values: config.redact_values.clone(),
            replacement: config.replacement.clone(),
        }
    }
}

impl ToolOutputPolicy {
    /// Add key names to redact, keeping existing entries.
    pub fn with_redact_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            let key = key.into();
            if !self.should_redact_key(&key) {
                self.redact_keys.push(key);
            }
        }
        self
    }

    /// Apply the policy to a JSON value.
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(value) => Value::String(self.apply_string(value)),
            Value::Array(values) => Value::Array(
                values
                    .into_iter()
                    .take(self.max_array_len)
                    .map(|value| self.apply(value))
                    .collect(),
            ),
            Value::Object(values) => {
                let mut trimmed =
                    serde_json::Map::with_capacity(values.len().min(self.max_object_entries));
                for (key, value) in values.into_iter().take(self.max_object_entries) {
                    let value = if self.should_redact_key(&key) {
                        Value::String(self.truncate_string(self.replacement.clone()))
                    } else {
                        self.apply(value)
                    };
                    trimmed.insert(key, value);
                }
                Value::Object(trimmed)
            }
            value => value,
        }
    }

    fn apply_string(&self, value: String) -> String {
        if self.should_redact_value(&value) {
            return self.truncate_string(self.replacement.clone());
        }
        self.truncate_string(value)
    }

    fn should_redact_key(&self, key: &str) -> bool {
        self.redact_keys
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(key))
    }

    fn should_redact_value(&self, value: &str) -> bool {
        if self.redact_values.is_empty() {
            return false;
        }
        let lowered = value.to_ascii_lowercase();
        self.redact_values
            .iter()
            .any(|entry| lowered.contains(&entry.to_ascii_lowercase()))
    }

    /// Truncate on a char boundary at or below `max_string_bytes`.
    fn truncate_string(&self, value: String) -> String {
        let max_bytes = self.max_string_bytes;
        if value.len() <= max_bytes {
            return value;
        }
        let mut end = 0;
        for (idx, ch) in value.char_indices() {
            let next = idx + ch.len_utf8();
            if next > max_bytes {
                break;
            }
            end = next;
        }
        value[..end].to_string()
    }
}
