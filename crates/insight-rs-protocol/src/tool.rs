/// Errors returned by tool lookup and execution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    /// Tool name was not found in registry.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Tool received invalid arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Tool execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
