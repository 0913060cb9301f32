//! Configuration schema for Insight.

use serde::{Deserialize, Serialize};

/// Root config for the Insight service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InsightConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl InsightConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> InsightConfigBuilder {
        InsightConfigBuilder::new()
    }
}

/// Builder for assembling an `InsightConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct InsightConfigBuilder {
    config: InsightConfig,
}

impl InsightConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: InsightConfig::default(),
        }
    }

    /// Replace the HTTP server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the model provider configuration.
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.config.model = model;
        self
    }

    /// Replace the agent loop configuration.
    pub fn agent(mut self, agent: AgentConfig) -> Self {
        self.config.agent = agent;
        self
    }

    /// Replace the tool configuration.
    pub fn tools(mut self, tools: ToolsConfig) -> Self {
        self.config.tools = tools;
        self
    }

    /// Replace the history persistence configuration.
    pub fn history(mut self, history: HistoryConfig) -> Self {
        self.config.history = history;
        self
    }

    /// Replace the demo data configuration.
    pub fn data(mut self, data: DataConfig) -> Self {
        self.config.data = data;
        self
    }

    /// Finalize and return the built `InsightConfig`.
    pub fn build(self) -> InsightConfig {
        self.config
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    ["http://localhost:3000", "http://localhost:5173", "http://localhost:5180"]
        .iter()
        .map(|origin| origin.to_string())
        .collect()
}

/// Hosted model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on a single model call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            name: default_model_name(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Supported hosted model providers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelProvider {
    #[default]
    Openai,
    Anthropic,
}

impl ModelProvider {
    /// Environment variable holding the provider API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ModelProvider::Openai => "OPENAI_API_KEY",
            ModelProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::Openai => "openai",
            ModelProvider::Anthropic => "anthropic",
        }
    }
}

fn default_model_name() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

/// Dataset and tool set the agent works against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Gender and climate indicators across countries.
    #[default]
    Climate,
    /// Personal banking accounts and transactions.
    Banking,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Climate => "climate",
            Domain::Banking => "banking",
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "climate" => Ok(Domain::Climate),
            "banking" => Ok(Domain::Banking),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// Conversation loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub domain: Domain,
    /// Maximum tool round trips per analysis.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Replaces the built-in system prompt for the domain.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Appended to the resolved system prompt.
    #[serde(default)]
    pub append_system_prompt: Option<String>,
    /// Capacity of the per-analysis step channel.
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            max_iterations: default_max_iterations(),
            system_prompt: None,
            append_system_prompt: None,
            stream_buffer: default_stream_buffer(),
        }
    }
}

fn default_max_iterations() -> usize {
    15
}

fn default_stream_buffer() -> usize {
    512
}

/// Global tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsConfig {
    #[serde(default)]
    pub output_policy: ToolOutputPolicyConfig,
}

/// Output policy for tool observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutputPolicyConfig {
    #[serde(default = "default_max_string_bytes")]
    pub max_string_bytes: usize,
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    #[serde(default = "default_max_object_entries")]
    pub max_object_entries: usize,
    #[serde(default)]
    pub redact_keys: Vec<String>,
    #[serde(default)]
    pub redact_values: Vec<String>,
    #[serde(default = "default_redaction_replacement")]
    pub replacement: String,
}

impl Default for ToolOutputPolicyConfig {
    fn default() -> Self {
        Self {
            max_string_bytes: default_max_string_bytes(),
            max_array_len: default_max_array_len(),
            max_object_entries: default_max_object_entries(),
            redact_keys: Vec::new(),
            redact_values: Vec::new(),
            replacement: default_redaction_replacement(),
        }
    }
}

/// Default maximum string size for tool output in bytes.
fn default_max_string_bytes() -> usize {
    16 * 1024
}

/// Default maximum array length for tool output.
fn default_max_array_len() -> usize {
    100
}

/// Default maximum object entry count for tool output.
fn default_max_object_entries() -> usize {
    100
}

/// Default replacement marker for redacted fields.
fn default_redaction_replacement() -> String {
    "[REDACTED]".to_string()
}

/// History persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Persist completed analyses to disk.
    #[serde(default)]
    pub enabled: bool,
    /// Directory for the history file; defaults to `.insight/history`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Demo dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Seed for the generated datasets.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

fn default_seed() -> u64 {
    42
}
