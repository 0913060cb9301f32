//! Builder for the JSON argument schemas advertised to the model.

use serde_json::{Map, Value, json};

/// Parameter types supported in tool argument schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    IntegerArray,
    /// Free-form mapping of string keys to values.
    Object,
}

impl ParamType {
    fn schema(&self) -> Value {
        match self {
            ParamType::String => json!({ "type": "string" }),
            ParamType::Integer => json!({ "type": "integer" }),
            ParamType::Number => json!({ "type": "number" }),
            ParamType::Boolean => json!({ "type": "boolean" }),
            ParamType::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            ParamType::NumberArray => json!({ "type": "array", "items": { "type": "number" } }),
            ParamType::IntegerArray => json!({ "type": "array", "items": { "type": "integer" } }),
            ParamType::Object => json!({ "type": "object" }),
        }
    }
}

/// Ordered set of named parameters rendered as a JSON object schema.
#[derive(Debug, Clone, Default)]
pub struct ArgsSchema {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl ArgsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter.
    pub fn param(self, name: &str, kind: ParamType, description: &str) -> Self {
        self.insert(name, kind.schema(), description, true)
    }

    /// Add an optional parameter.
    pub fn optional(self, name: &str, kind: ParamType, description: &str) -> Self {
        self.insert(name, kind.schema(), description, false)
    }

    /// Add a string parameter restricted to `choices`.
    pub fn one_of(self, name: &str, choices: &[&str], description: &str, required: bool) -> Self {
        let schema = json!({ "type": "string", "enum": choices });
        self.insert(name, schema, description, required)
    }

    fn insert(mut self, name: &str, mut schema: Value, description: &str, required: bool) -> Self {
        if !description.is_empty()
            && let Some(object) = schema.as_object_mut()
        {
            object.insert("description".to_string(), Value::String(description.to_string()));
        }
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Render the `{"type": "object", ...}` schema.
    pub fn build(self) -> Value {
        json!({
            "type": "object",
            "properties": Value::Object(self.properties),
            "required": self.required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ArgsSchema, ParamType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn build_renders_required_and_optional_params() {
        let schema = ArgsSchema::new()
            .param("values", ParamType::NumberArray, "Values to summarise")
            .optional("label", ParamType::String, "")
            .one_of("mode", &["fast", "slow"], "Mode", false)
            .build();

        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "values": {
                        "type": "array",
                        "items": { "type": "number" },
                        "description": "Values to summarise"
                    },
                    "label": { "type": "string" },
                    "mode": { "type": "string", "enum": ["fast", "slow"], "description": "Mode" }
                },
                "required": ["values"]
            })
        );
    }

    #[test]
    fn empty_schema_has_no_required_fields() {
        assert_eq!(
            ArgsSchema::new().build(),
            json!({ "type": "object", "properties": {}, "required": [] })
        );
    }
}
