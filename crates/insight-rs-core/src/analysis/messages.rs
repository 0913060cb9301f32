//! Conversions between tool specs, tool calls and chat messages.

use autoagents_llm::chat::{ChatMessage, ChatRole, FunctionTool, MessageType, Tool};
use autoagents_llm::{FunctionCall, ToolCall};
use insight_rs_tools::ToolSpec;
use serde_json::{Map, Value};

/// Advertise registry specs as function tools.
pub(crate) fn chat_tools(specs: &[ToolSpec]) -> Vec<Tool> {
    specs
        .iter()
        .map(|spec| Tool {
            tool_type: "function".to_string(),
            function: FunctionTool {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: spec.args_schema.clone(),
            },
        })
        .collect()
}

/// Parse raw call arguments; blank input is an empty object and
/// non-JSON input is kept as a string so the trace still shows it.
pub(crate) fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub(crate) fn text_message(role: ChatRole, content: impl Into<String>) -> ChatMessage {
    ChatMessage {
        role,
        message_type: MessageType::Text,
        content: content.into(),
    }
}

pub(crate) fn tool_use_message(text: String, calls: Vec<ToolCall>) -> ChatMessage {
    ChatMessage {
        role: ChatRole::Assistant,
        message_type: MessageType::ToolUse(calls),
        content: text,
    }
}

/// All observations of one turn, in requested order.
pub(crate) fn tool_result_message(results: Vec<ToolCall>) -> ChatMessage {
    ChatMessage {
        role: ChatRole::Tool,
        message_type: MessageType::ToolResult(results),
        content: String::new(),
    }
}

pub(crate) fn tool_result(call: &ToolCall, output: &Value) -> ToolCall {
    ToolCall {
        id: call.id.clone(),
        call_type: call.call_type.clone(),
        function: FunctionCall {
            name: call.function.name.clone(),
            arguments: output.to_string(),
        },
    }
}
