//! The `Tool` trait and the spec advertised to the model.

use crate::context::ToolContext;
use crate::output::ToolOutput;
use insight_rs_protocol::ToolError;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// What the model and `GET /api/tools` see of a tool.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema object for the arguments.
    pub args_schema: Value,
}

/// A named analysis function over the demo data.
///
/// Tools only read in-memory data, so `call` is synchronous and must be
/// deterministic for identical arguments and context.
pub trait Tool: Send + Sync + Debug {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn args_schema(&self) -> Value;

    /// Run the tool. Plan tools attach a `PlanDelta` to their output.
    fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}
