//! Tooling interfaces and built-in tools for Insight.

pub mod builtins;
pub mod context;
pub mod output;
pub mod output_policy;
pub mod registry;
pub mod schema;
pub mod tool;

/// Built-in tool sets and registry constructors.
pub use builtins::{
    BANKING_REDACT_KEYS, banking_tool_registry, climate_tool_registry, register_banking_tools,
    register_climate_tools, register_plan_tools, register_stats_tools,
};
/// Read-only context handed to every tool call.
pub use context::ToolContext;
/// Tool results and typed plan mutations.
pub use output::{PlanDelta, ToolOutput};
/// Tool output policy.
pub use output_policy::ToolOutputPolicy;
/// Tool registry type.
pub use registry::ToolRegistry;
/// Argument schema builder.
pub use schema::{ArgsSchema, ParamType};
/// Tool trait and spec type.
pub use tool::{Tool, ToolSpec};
