//! Test helpers shared across Insight crates.

pub mod llm;
pub mod tools;

pub use llm::{FailingLLM, FixedChatResponse, ScriptedLLM, ScriptedTurn, StalledLLM, tool_call};
pub use tools::{EchoTool, FailingTool};
