//! Structured analysis plans tracked alongside a trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle status of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan exists but no step has started.
    #[default]
    Pending,
    /// Plan is being worked through.
    InProgress,
    /// Every step has been completed.
    Completed,
}

/// Goal plus ordered step descriptions, with a cursor over the active step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Plan identifier.
    pub id: Uuid,
    /// Goal the plan works towards.
    pub goal: String,
    /// Ordered step descriptions.
    pub steps: Vec<String>,
    /// Index of the currently active step (0-based, never above `steps.len()`).
    pub current_step: usize,
    /// Plan status.
    pub status: PlanStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Summary returned after a plan step is marked complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanProgress {
    pub completed_step: usize,
    pub step_description: String,
    pub remaining_steps: usize,
}

/// Errors raised while advancing a plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no active plan")]
    NoActivePlan,
    #[error("step index {index} out of range (plan has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}

impl Plan {
    /// Create a pending plan.
    pub fn new(goal: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal: goal.into(),
            steps,
            current_step: 0,
            status: PlanStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Mark the plan as started.
    pub fn start(&mut self) {
        if self.status == PlanStatus::Pending {
            self.status = if self.steps.is_empty() {
                PlanStatus::Completed
            } else {
                PlanStatus::InProgress
            };
        }
    }

    /// Mark `index` as done and move the cursor to the following step.
    pub fn complete_step(&mut self, index: usize) -> Result<PlanProgress, PlanError> {
        let len = self.steps.len();
        let Some(description) = self.steps.get(index).cloned() else {
            return Err(PlanError::StepOutOfRange { index, len });
        };
        self.current_step = index + 1;
        self.status = if self.current_step >= len {
            PlanStatus::Completed
        } else {
            PlanStatus::InProgress
        };
        Ok(PlanProgress {
            completed_step: index,
            step_description: description,
            remaining_steps: self.remaining(),
        })
    }

    /// Number of steps after the cursor.
    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.current_step)
    }
}

#[cfg(test)]
mod tests {
    use super::{Plan, PlanError, PlanProgress, PlanStatus};
    use pretty_assertions::assert_eq;

    fn plan(steps: &[&str]) -> Plan {
        let mut plan = Plan::new(
            "compare regions",
            steps.iter().map(|step| step.to_string()).collect(),
        );
        plan.start();
        plan
    }

    #[test]
    fn completing_last_step_finishes_plan() {
        let mut plan = plan(&["collect", "compute"]);
        assert_eq!(plan.status, PlanStatus::InProgress);

        let progress = plan.complete_step(0).expect("first step");
        assert_eq!(
            progress,
            PlanProgress {
                completed_step: 0,
                step_description: "collect".to_string(),
                remaining_steps: 1,
            }
        );
        assert_eq!(plan.status, PlanStatus::InProgress);

        plan.complete_step(1).expect("second step");
        assert_eq!(plan.current_step, 2);
        assert_eq!(plan.status, PlanStatus::Completed);
        assert_eq!(plan.remaining(), 0);
    }

    #[test]
    fn out_of_range_step_leaves_plan_untouched() {
        let mut plan = plan(&["only"]);
        let err = plan.complete_step(3).expect_err("out of range");
        assert_eq!(err, PlanError::StepOutOfRange { index: 3, len: 1 });
        assert_eq!(plan.current_step, 0);
        assert!(plan.current_step <= plan.steps.len());
    }

    #[test]
    fn empty_plan_completes_on_start() {
        let plan = plan(&[]);
        assert_eq!(plan.status, PlanStatus::Completed);
    }
}
