//! Tools that create and advance the analysis plan.

use crate::builtins::utils::parse_args;
use crate::output::{PlanDelta, ToolOutput};
use crate::schema::{ArgsSchema, ParamType};
use crate::{Tool, ToolContext};
use insight_rs_protocol::ToolError;
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

/// Creates a structured plan for the current analysis.
#[derive(Debug, Default)]
pub struct CreatePlanTool;

#[derive(Debug, Deserialize)]
struct CreatePlanArgs {
    goal: String,
    steps: Vec<String>,
}

impl Tool for CreatePlanTool {
    fn name(&self) -> &str {
        "create_analysis_plan"
    }

    fn description(&self) -> &str {
        "Create a structured plan for the analysis. Always call this first for multi-step questions."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param("goal", ParamType::String, "Main goal of the analysis")
            .param("steps", ParamType::StringArray, "Ordered steps to reach the goal")
            .build()
    }

    fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: CreatePlanArgs = parse_args(args)?;
        if input.goal.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "goal cannot be empty".to_string(),
            ));
        }
        info!(
            "creating analysis plan (analysis_id={}, steps={})",
            ctx.analysis_id,
            input.steps.len()
        );
        let steps: Vec<Value> = input
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| json!({ "index": index, "step": step, "status": "pending" }))
            .collect();
        let value = json!({
            "status": "plan created",
            "goal": input.goal,
            "steps": steps,
        });
        Ok(ToolOutput::new(value).with_plan_delta(PlanDelta::Create {
            goal: input.goal,
            steps: input.steps,
        }))
    }
}

/// Marks a plan step as completed.
#[derive(Debug, Default)]
pub struct UpdatePlanTool;

#[derive(Debug, Deserialize)]
struct UpdatePlanArgs {
    step_completed: usize,
}

impl Tool for UpdatePlanTool {
    fn name(&self) -> &str {
        "update_plan_progress"
    }

    fn description(&self) -> &str {
        "Update plan progress by marking a step as completed."
    }

    fn args_schema(&self) -> Value {
        ArgsSchema::new()
            .param(
                "step_completed",
                ParamType::Integer,
                "Index of the completed step (0-based)",
            )
            .build()
    }

    fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let input: UpdatePlanArgs = parse_args(args)?;
        let mut preview = ctx.active_plan()?.clone();
        let progress = preview
            .complete_step(input.step_completed)
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        info!(
            "plan progress updated (analysis_id={}, step={}, remaining={})",
            ctx.analysis_id, progress.completed_step, progress.remaining_steps
        );
        let value = json!({
            "status": "progress updated",
            "completed_step": progress.completed_step,
            "step_description": progress.step_description,
            "remaining_steps": progress.remaining_steps,
        });
        Ok(ToolOutput::new(value).with_plan_delta(PlanDelta::CompleteStep {
            index: input.step_completed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{CreatePlanTool, UpdatePlanTool};
    use crate::output::PlanDelta;
    use crate::{Tool, ToolContext};
    use insight_rs_protocol::{Plan, ToolError};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn ctx(plan: Option<Plan>) -> ToolContext {
        ToolContext::new(Uuid::new_v4()).with_plan(plan)
    }

    #[test]
    fn create_returns_plan_delta() {
        let output = CreatePlanTool
            .call(
                &ctx(None),
                json!({ "goal": "Compare Kenya and Sweden", "steps": ["profile", "compare"] }),
            )
            .expect("create");

        assert_eq!(output.value["steps"][1], json!({ "index": 1, "step": "compare", "status": "pending" }));
        assert_eq!(
            output.plan_delta,
            Some(PlanDelta::Create {
                goal: "Compare Kenya and Sweden".to_string(),
                steps: vec!["profile".to_string(), "compare".to_string()],
            })
        );
    }

    #[test]
    fn create_rejects_blank_goal() {
        let err = CreatePlanTool
            .call(&ctx(None), json!({ "goal": " ", "steps": [] }))
            .expect_err("blank");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn update_reports_progress_without_mutating_context() {
        let mut plan = Plan::new("goal", vec!["a".to_string(), "b".to_string()]);
        plan.start();
        let ctx = ctx(Some(plan));

        let output = UpdatePlanTool
            .call(&ctx, json!({ "step_completed": 0 }))
            .expect("update");
        assert_eq!(output.value["remaining_steps"], json!(1));
        assert_eq!(output.value["step_description"], json!("a"));
        assert_eq!(output.plan_delta, Some(PlanDelta::CompleteStep { index: 0 }));
        assert_eq!(ctx.plan.as_ref().map(|plan| plan.current_step), Some(0));
    }

    #[test]
    fn update_fails_without_plan_or_out_of_range() {
        let err = UpdatePlanTool
            .call(&ctx(None), json!({ "step_completed": 0 }))
            .expect_err("no plan");
        assert_eq!(err, ToolError::ExecutionFailed("no active plan".to_string()));

        let plan = Plan::new("goal", vec!["a".to_string()]);
        let err = UpdatePlanTool
            .call(&ctx(Some(plan)), json!({ "step_completed": 4 }))
            .expect_err("range");
        assert!(matches!(err, ToolError::ExecutionFailed(msg) if msg.contains("out of range")));

        let err = UpdatePlanTool
            .call(&ctx(None), json!({ "step_completed": -1 }))
            .expect_err("negative");
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
