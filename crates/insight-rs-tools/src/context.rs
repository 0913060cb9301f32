//! Per-call context passed to tools.

use insight_rs_protocol::{AnalysisId, Plan, PlanError, ToolError};

/// Snapshot of analysis state visible to a tool call.
///
/// Tools never mutate the analysis; plan changes are requested through
/// [`crate::PlanDelta`] in the returned output.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Analysis the call belongs to.
    pub analysis_id: AnalysisId,
    /// Plan as it stood before this call.
    pub plan: Option<Plan>,
}

impl ToolContext {
    pub fn new(analysis_id: AnalysisId) -> Self {
        Self {
            analysis_id,
            plan: None,
        }
    }

    /// Attach the current plan snapshot.
    pub fn with_plan(mut self, plan: Option<Plan>) -> Self {
        self.plan = plan;
        self
    }

    /// Current plan, or an execution error when none was created yet.
    pub fn active_plan(&self) -> Result<&Plan, ToolError> {
        self.plan
            .as_ref()
            .ok_or_else(|| ToolError::ExecutionFailed(PlanError::NoActivePlan.to_string()))
    }
}
