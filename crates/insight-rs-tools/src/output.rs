//! Tool results and the plan mutations they may request.

use insight_rs_protocol::{Plan, PlanError};
use serde_json::Value;

/// Change to the analysis plan requested by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanDelta {
    /// Replace the plan with a new, started one.
    Create { goal: String, steps: Vec<String> },
    /// Mark a step of the current plan as done.
    CompleteStep { index: usize },
}

impl PlanDelta {
    /// Apply the change in place and return the resulting plan.
    pub fn apply(self, plan: &mut Option<Plan>) -> Result<Plan, PlanError> {
        match self {
            PlanDelta::Create { goal, steps } => {
                let mut created = Plan::new(goal, steps);
                created.start();
                *plan = Some(created.clone());
                Ok(created)
            }
            PlanDelta::CompleteStep { index } => {
                let current = plan.as_mut().ok_or(PlanError::NoActivePlan)?;
                current.complete_step(index)?;
                Ok(current.clone())
            }
        }
    }
}

/// Structured result of a successful tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// Observation payload.
    pub value: Value,
    /// Optional plan change to apply after the call.
    pub plan_delta: Option<PlanDelta>,
}

impl ToolOutput {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            plan_delta: None,
        }
    }

    pub fn with_plan_delta(mut self, delta: PlanDelta) -> Self {
        self.plan_delta = Some(delta);
        self
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_rs_protocol::PlanStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_then_complete_updates_plan() {
        let mut plan = None;
        let created = PlanDelta::Create {
            goal: "compare".to_string(),
            steps: vec!["a".to_string(), "b".to_string()],
        }
        .apply(&mut plan)
        .expect("create");
        assert_eq!(created.status, PlanStatus::InProgress);

        let updated = PlanDelta::CompleteStep { index: 1 }
            .apply(&mut plan)
            .expect("complete");
        assert_eq!(updated.current_step, 2);
        assert_eq!(updated.status, PlanStatus::Completed);
        assert_eq!(plan, Some(updated));
    }

    #[test]
    fn completing_without_plan_fails() {
        let mut plan = None;
        let err = PlanDelta::CompleteStep { index: 0 }
            .apply(&mut plan)
            .expect_err("no plan");
        assert_eq!(err, PlanError::NoActivePlan);
        assert!(plan.is_none());
    }
}
