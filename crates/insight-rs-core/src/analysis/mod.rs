//! Tool-calling conversation loop and its step channel.

mod conversation;
mod messages;
mod trace;

pub use conversation::ConversationLoop;
pub use trace::TraceSender;

use crate::prompt::{default_system_prompt, system_prompt_from_config};
use insight_rs_config::{Domain, InsightConfig};
use insight_rs_tools::{BANKING_REDACT_KEYS, ToolOutputPolicy};
use std::time::Duration;

/// Settings for a single conversation loop.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// System prompt sent ahead of the query.
    pub system_prompt: String,
    /// Maximum tool round trips before the analysis fails.
    pub max_iterations: usize,
    /// Upper bound on a single model call.
    pub model_timeout: Duration,
    /// Truncation and redaction applied to observations.
    pub output_policy: ToolOutputPolicy,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(Domain::Climate).to_string(),
            max_iterations: 15,
            model_timeout: Duration::from_secs(120),
            output_policy: ToolOutputPolicy::default(),
        }
    }
}

impl LoopSettings {
    /// Derive loop settings from the loaded config.
    pub fn from_config(config: &InsightConfig) -> Self {
        let mut output_policy = ToolOutputPolicy::from(&config.tools.output_policy);
        if config.agent.domain == Domain::Banking {
            output_policy = output_policy.with_redact_keys(BANKING_REDACT_KEYS.iter().copied());
        }
        Self {
            system_prompt: system_prompt_from_config(&config.agent),
            max_iterations: config.agent.max_iterations,
            model_timeout: Duration::from_secs(config.model.timeout_secs),
            output_policy,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_output_policy(mut self, policy: ToolOutputPolicy) -> Self {
        self.output_policy = policy;
        self
    }
}
