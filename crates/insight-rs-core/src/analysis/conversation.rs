//! The reason-act-observe loop driving one analysis.

use super::LoopSettings;
use super::messages::{
    chat_tools, parse_arguments, text_message, tool_result, tool_result_message,
    tool_use_message,
};
use super::trace::TraceSender;
use crate::error::InsightCoreError;
use autoagents_llm::LLMProvider;
use autoagents_llm::ToolCall;
use autoagents_llm::chat::{ChatMessage, ChatResponse, ChatRole, Tool};
use insight_rs_protocol::{Analysis, StepKind};
use insight_rs_tools::{ToolContext, ToolRegistry};
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::sync::Arc;

/// Drives model turns and tool calls for a single analysis.
///
/// Tool calls within a turn run sequentially in the order the model listed
/// them; all of their results are sent back in one message before the next
/// model call.
#[derive(Clone)]
pub struct ConversationLoop {
    llm: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    settings: LoopSettings,
}

impl ConversationLoop {
    pub fn new(llm: Arc<dyn LLMProvider>, tools: ToolRegistry, settings: LoopSettings) -> Self {
        Self {
            llm,
            tools,
            settings,
        }
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    /// Run `analysis` to a terminal state, forwarding each step to `trace`.
    ///
    /// Model failures, timeouts and the iteration cap leave the analysis
    /// `failed` and still return `Ok`. `Err(Cancelled)` means the consumer
    /// left and the partial analysis was abandoned.
    pub async fn run(
        &self,
        mut analysis: Analysis,
        trace: &TraceSender,
    ) -> Result<Analysis, InsightCoreError> {
        info!(
            "starting analysis (analysis_id={}, query_len={}, max_iterations={})",
            analysis.id,
            analysis.query.len(),
            self.settings.max_iterations
        );
        let tools = chat_tools(&self.tools.specs());
        let mut messages = vec![
            text_message(ChatRole::System, self.settings.system_prompt.clone()),
            text_message(ChatRole::User, analysis.query.clone()),
        ];
        let mut round_trips = 0usize;

        loop {
            trace.ensure_attached()?;
            let response = match self.call_model(&messages, &tools).await {
                Ok(response) => response,
                Err(reason) => {
                    warn!(
                        "analysis failed (analysis_id={}, reason={})",
                        analysis.id, reason
                    );
                    analysis.fail(reason);
                    return Ok(analysis);
                }
            };

            let text = response.text().unwrap_or_default();
            let calls = response.tool_calls().unwrap_or_default();
            debug!(
                "model turn received (analysis_id={}, text_len={}, tool_calls={})",
                analysis.id,
                text.len(),
                calls.len()
            );
            if !text.trim().is_empty() {
                let step = analysis.push_step(StepKind::Reasoning {
                    content: text.clone(),
                });
                trace.send(step).await?;
            }

            if calls.is_empty() {
                let step = analysis.complete(text);
                trace.send(step).await?;
                info!(
                    "analysis completed (analysis_id={}, steps={}, round_trips={})",
                    analysis.id,
                    analysis.steps.len(),
                    round_trips
                );
                return Ok(analysis);
            }

            if round_trips >= self.settings.max_iterations {
                let reason = format!(
                    "iteration cap reached (max_iterations={})",
                    self.settings.max_iterations
                );
                warn!(
                    "analysis failed (analysis_id={}, reason={})",
                    analysis.id, reason
                );
                analysis.fail(reason);
                return Ok(analysis);
            }
            round_trips += 1;

            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                let output = self.execute_call(&mut analysis, call, trace).await?;
                results.push(tool_result(call, &output));
            }
            messages.push(tool_use_message(text, calls));
            messages.push(tool_result_message(results));
        }
    }

    async fn call_model(
        &self,
        messages: &[ChatMessage],
        tools: &[Tool],
    ) -> Result<Box<dyn ChatResponse>, String> {
        let tools = (!tools.is_empty()).then_some(tools);
        let call = self.llm.chat_with_tools(messages, tools, None);
        match tokio::time::timeout(self.settings.model_timeout, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(format!("model call failed: {err}")),
            Err(_) => Err(format!(
                "model call timed out after {:?}",
                self.settings.model_timeout
            )),
        }
    }

    /// Emit the action, run the tool, emit the observation (and a plan
    /// snapshot when the tool changed the plan). Returns the observation
    /// payload for the model.
    async fn execute_call(
        &self,
        analysis: &mut Analysis,
        call: &ToolCall,
        trace: &TraceSender,
    ) -> Result<Value, InsightCoreError> {
        let tool_name = call.function.name.clone();
        let input = parse_arguments(&call.function.arguments);
        let step = analysis.push_step(StepKind::Action {
            tool_name: tool_name.clone(),
            input: input.clone(),
        });
        trace.send(step).await?;

        let ctx = ToolContext::new(analysis.id).with_plan(analysis.plan.clone());
        let mut plan_snapshot = None;
        let (output, is_error) = match self.tools.execute(&tool_name, &ctx, input) {
            Ok(output) => {
                let value = self.settings.output_policy.apply(output.value);
                match output.plan_delta.map(|delta| delta.apply(&mut analysis.plan)) {
                    Some(Err(err)) => (json!({ "error": err.to_string() }), true),
                    Some(Ok(plan)) => {
                        plan_snapshot = Some(plan);
                        (value, false)
                    }
                    None => (value, false),
                }
            }
            Err(err) => {
                warn!(
                    "tool call failed (analysis_id={}, tool={}, error={})",
                    analysis.id, tool_name, err
                );
                (json!({ "error": err.to_string() }), true)
            }
        };

        let step = analysis.push_step(StepKind::Observation {
            tool_name,
            output: output.clone(),
            is_error,
        });
        trace.send(step).await?;
        if let Some(plan) = plan_snapshot {
            debug!(
                "plan updated (analysis_id={}, current_step={}, steps={})",
                analysis.id,
                plan.current_step,
                plan.steps.len()
            );
            let step = analysis.push_step(StepKind::Plan { plan });
            trace.send(step).await?;
        }
        Ok(output)
    }
}

impl std::fmt::Debug for ConversationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationLoop")
            .field("tools", &self.tools)
            .field("settings", &self.settings)
            .finish()
    }
}
