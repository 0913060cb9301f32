//! Wire protocol types for Insight analyses, trace steps, and streaming messages.

mod plan;
mod tool;

pub use plan::{Plan, PlanError, PlanProgress, PlanStatus};
pub use tool::ToolError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for an analysis.
pub type AnalysisId = Uuid;
/// Unique identifier for a step within an analysis.
pub type StepId = Uuid;

/// One recorded unit of a reasoning trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Step identifier.
    pub id: StepId,
    /// Timestamp when the step was recorded.
    pub created_at: DateTime<Utc>,
    /// Step payload.
    #[serde(flatten)]
    pub kind: StepKind,
}

/// Step payload variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum StepKind {
    /// Free text produced by the model before acting.
    Reasoning { content: String },
    /// Tool invocation chosen by the model.
    Action { tool_name: String, input: Value },
    /// Output of a tool invocation, or its failure.
    Observation {
        tool_name: String,
        output: Value,
        is_error: bool,
    },
    /// Snapshot of the analysis plan after it changed.
    Plan { plan: Plan },
    /// Final natural-language answer.
    Result { content: String },
}

impl StepKind {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Reasoning { .. } => "reasoning",
            StepKind::Action { .. } => "action",
            StepKind::Observation { .. } => "observation",
            StepKind::Plan { .. } => "plan",
            StepKind::Result { .. } => "result",
        }
    }
}

/// Analysis lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Running,
    Completed,
    Failed,
}

/// One end-to-end query-to-answer session with its full trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    /// Analysis identifier.
    pub id: AnalysisId,
    /// Original query text.
    pub query: String,
    /// Plan created during the analysis, if any.
    pub plan: Option<Plan>,
    /// Chronological trace.
    pub steps: Vec<Step>,
    /// Lifecycle status.
    pub status: AnalysisStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, set when the analysis completes.
    pub completed_at: Option<DateTime<Utc>>,
    /// Final answer text.
    pub result: Option<String>,
    /// Failure reason for failed analyses.
    pub error: Option<String>,
}

impl Analysis {
    /// Start a new running analysis for a query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            plan: None,
            steps: Vec::new(),
            status: AnalysisStatus::Running,
            created_at: Utc::now(),
            completed_at: None,
            result: None,
            error: None,
        }
    }

    /// Append a step and return a copy of it.
    ///
    /// Timestamps are clamped so the trace never goes backwards in time.
    pub fn push_step(&mut self, kind: StepKind) -> Step {
        let now = Utc::now();
        let created_at = match self.steps.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        let step = Step {
            id: Uuid::new_v4(),
            created_at,
            kind,
        };
        self.steps.push(step.clone());
        step
    }

    /// Record the final answer and mark the analysis completed.
    pub fn complete(&mut self, text: impl Into<String>) -> Step {
        let text = text.into();
        let step = self.push_step(StepKind::Result {
            content: text.clone(),
        });
        self.result = Some(text);
        self.status = AnalysisStatus::Completed;
        self.completed_at = Some(step.created_at);
        step
    }

    /// Mark the analysis failed with a reason.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = AnalysisStatus::Failed;
        self.error = Some(reason.into());
    }

    /// Whether the analysis reached completed or failed.
    pub fn is_terminal(&self) -> bool {
        self.status != AnalysisStatus::Running
    }
}

/// Messages sent from the server to a streaming client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum StreamMessage {
    /// Analysis accepted.
    Start {
        query: String,
        timestamp: DateTime<Utc>,
    },
    /// One trace step.
    Thought { data: Step },
    /// Terminal message carrying the completed analysis.
    Complete { data: Box<Analysis> },
    /// Terminal failure message.
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        analysis_id: Option<AnalysisId>,
    },
}

/// Messages sent from a streaming client to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ClientMessage {
    /// Submit a query for analysis.
    Query { query: String },
}

/// Metadata for a configured data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
}
