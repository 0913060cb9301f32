use insight_rs_protocol::ToolError;
use insight_rs_tools::{ArgsSchema, ParamType, Tool, ToolContext, ToolOutput};
use serde_json::{Value, json};

/// Returns its arguments wrapped as `{"echo": args}`.
#[derive(Debug, Clone, Default)]
pub struct EchoTool;

impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the arguments back"
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .optional("text", ParamType::String, "Text to echo")
            .build()
    }

    fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::new(json!({ "echo": args })))
    }
}

/// Always fails with `ExecutionFailed`.
#[derive(Debug, Clone)]
pub struct FailingTool {
    name: String,
    message: String,
}

impl FailingTool {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl Tool for FailingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Tool that always fails"
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new().build()
    }

    fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        Err(ToolError::ExecutionFailed(self.message.clone()))
    }
}
