//! Core analysis primitives for Insight.
//!
//! This crate owns the tool-calling conversation loop, the per-analysis step
//! channel, history storage, and the `InsightHub` facade used by the server
//! and the CLI.

pub mod analysis;
pub mod error;
pub mod history;
pub mod hub;
pub mod prompt;
pub mod state;

pub use analysis::{ConversationLoop, LoopSettings, TraceSender};
pub use error::InsightCoreError;
pub use history::{HistoryStore, build_history_store};
pub use hub::{AnalysisCompletion, AnalysisStream, InsightHub, InsightHubBuilder};
pub use prompt::{SystemPromptMode, default_system_prompt, system_prompt_from_config};
pub use state::{HistoryBackend, JsonlHistoryStore, StateError};
