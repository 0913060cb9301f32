use async_trait::async_trait;
use autoagents_llm::chat::{
    ChatMessage, ChatProvider, ChatResponse, StructuredOutputFormat, Tool,
};
use autoagents_llm::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use autoagents_llm::embedding::EmbeddingProvider;
use autoagents_llm::error::LLMError;
use autoagents_llm::models::ModelsProvider;
use autoagents_llm::{FunctionCall, LLMProvider, ToolCall};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Build a function tool call with JSON arguments.
pub fn tool_call(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.into(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: name.into(),
            arguments: arguments.to_string(),
        },
    }
}

#[derive(Debug, Clone)]
pub struct FixedChatResponse {
    text: String,
    tool_calls: Option<Vec<ToolCall>>,
}

impl FixedChatResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: None,
        }
    }

    pub fn with_tool_calls(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Some(tool_calls),
        }
    }
}

impl std::fmt::Display for FixedChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ChatResponse for FixedChatResponse {
    fn text(&self) -> Option<String> {
        Some(self.text.clone())
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        self.tool_calls.clone()
    }
}

/// One scripted model reply.
#[derive(Debug, Clone)]
pub struct ScriptedTurn {
    text: String,
    tool_calls: Vec<ToolCall>,
}

impl ScriptedTurn {
    /// A final answer.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// A turn requesting tools, with optional leading commentary.
    pub fn tools(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: text.into(),
            tool_calls,
        }
    }

    fn response(&self) -> FixedChatResponse {
        if self.tool_calls.is_empty() {
            FixedChatResponse::new(self.text.clone())
        } else {
            FixedChatResponse::with_tool_calls(self.text.clone(), self.tool_calls.clone())
        }
    }
}

/// Replays scripted turns and records what the loop sent.
///
/// When the script runs out, the `repeat` turn (if any) is returned forever;
/// otherwise the call fails.
#[derive(Debug, Clone)]
pub struct ScriptedLLM {
    turns: Arc<Mutex<VecDeque<ScriptedTurn>>>,
    repeat: Option<ScriptedTurn>,
    gate: Option<Arc<Semaphore>>,
    seen_messages: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    seen_tools: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLLM {
    pub fn new(turns: Vec<ScriptedTurn>) -> Self {
        Self {
            turns: Arc::new(Mutex::new(turns.into())),
            repeat: None,
            gate: None,
            seen_messages: Arc::new(Mutex::new(Vec::new())),
            seen_tools: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `turn` on every call.
    pub fn repeating(turn: ScriptedTurn) -> Self {
        let mut llm = Self::new(Vec::new());
        llm.repeat = Some(turn);
        llm
    }

    /// Require one permit from `gate` before each reply.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Number of model calls received.
    pub fn calls(&self) -> usize {
        self.seen_messages.lock().len()
    }

    /// Conversation sent on each call.
    pub fn seen_messages(&self) -> Vec<Vec<ChatMessage>> {
        self.seen_messages.lock().clone()
    }

    /// Tool names advertised on the latest call.
    pub fn seen_tools(&self) -> Vec<String> {
        self.seen_tools.lock().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedLLM {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.seen_messages.lock().push(messages.to_vec());
        *self.seen_tools.lock() = tools
            .unwrap_or(&[])
            .iter()
            .map(|tool| tool.function.name.clone())
            .collect();
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|err| LLMError::ProviderError(err.to_string()))?;
            permit.forget();
        }
        let next = self.turns.lock().pop_front().or_else(|| self.repeat.clone());
        match next {
            Some(turn) => Ok(Box::new(turn.response())),
            None => Err(LLMError::ProviderError("script exhausted".to_string())),
        }
    }
}

#[async_trait]
impl CompletionProvider for ScriptedLLM {
    async fn complete(
        &self,
        _req: &CompletionRequest,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<CompletionResponse, LLMError> {
        Ok(CompletionResponse {
            text: "mock completion".to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedLLM {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        Ok(input.into_iter().map(|_| vec![0.0, 0.0]).collect())
    }
}

#[async_trait]
impl ModelsProvider for ScriptedLLM {}

impl LLMProvider for ScriptedLLM {}

#[derive(Debug, Clone)]
pub struct FailingLLM {
    message: String,
}

impl FailingLLM {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for FailingLLM {
    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: Option<&[Tool]>,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        Err(LLMError::ProviderError(self.message.clone()))
    }
}

#[async_trait]
impl CompletionProvider for FailingLLM {
    async fn complete(
        &self,
        _req: &CompletionRequest,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<CompletionResponse, LLMError> {
        Err(LLMError::ProviderError(self.message.clone()))
    }
}

#[async_trait]
impl EmbeddingProvider for FailingLLM {
    async fn embed(&self, _input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        Err(LLMError::ProviderError(self.message.clone()))
    }
}

#[async_trait]
impl ModelsProvider for FailingLLM {}

impl LLMProvider for FailingLLM {}

/// Never answers a chat call.
#[derive(Debug, Clone, Default)]
pub struct StalledLLM;

#[async_trait]
impl ChatProvider for StalledLLM {
    async fn chat_with_tools(
        &self,
        _messages: &[ChatMessage],
        _tools: Option<&[Tool]>,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        futures_util::future::pending::<()>().await;
        Err(LLMError::ProviderError("unreachable".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for StalledLLM {
    async fn complete(
        &self,
        _req: &CompletionRequest,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<CompletionResponse, LLMError> {
        futures_util::future::pending::<()>().await;
        Err(LLMError::ProviderError("unreachable".to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for StalledLLM {
    async fn embed(&self, _input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        Err(LLMError::ProviderError("stalled".to_string()))
    }
}

#[async_trait]
impl ModelsProvider for StalledLLM {}

impl LLMProvider for StalledLLM {}
