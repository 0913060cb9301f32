use autoagents_llm::LLMProvider;
use autoagents_llm::chat::MessageType;
use insight_rs_core::{ConversationLoop, LoopSettings, TraceSender};
use insight_rs_protocol::{Analysis, AnalysisStatus, PlanStatus, StepKind};
use insight_rs_test_utils::{
    EchoTool, FailingLLM, FailingTool, ScriptedLLM, ScriptedTurn, StalledLLM, tool_call,
};
use insight_rs_tools::{ToolRegistry, register_plan_tools, register_stats_tools};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_plan_tools(&registry);
    register_stats_tools(&registry);
    registry.register(Arc::new(EchoTool));
    registry.register(Arc::new(FailingTool::new("flaky_lookup", "upstream offline")));
    registry
}

fn conversation(llm: Arc<dyn LLMProvider>, settings: LoopSettings) -> ConversationLoop {
    ConversationLoop::new(llm, registry(), settings)
}

fn labels(analysis: &Analysis) -> Vec<&'static str> {
    analysis.steps.iter().map(|step| step.kind.label()).collect()
}

fn result_count(analysis: &Analysis) -> usize {
    analysis
        .steps
        .iter()
        .filter(|step| matches!(step.kind, StepKind::Result { .. }))
        .count()
}

#[tokio::test]
async fn average_query_reports_mean_of_twenty() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools(
            "I will compute descriptive statistics.",
            vec![tool_call(
                "call_1",
                "compute_statistics",
                json!({ "values": [10, 20, 30] }),
            )],
        ),
        ScriptedTurn::answer("The average of [10, 20, 30] is 20."),
    ]);
    let conversation = conversation(Arc::new(llm.clone()), LoopSettings::default());

    let analysis = conversation
        .run(Analysis::new("average of [10, 20, 30]"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert_eq!(
        labels(&analysis),
        vec!["reasoning", "action", "observation", "reasoning", "result"]
    );
    match &analysis.steps[2].kind {
        StepKind::Observation {
            tool_name,
            output,
            is_error,
        } => {
            assert_eq!(tool_name, "compute_statistics");
            assert_eq!(output["mean"], json!(20.0));
            assert!(!*is_error);
        }
        other => panic!("unexpected step: {other:?}"),
    }
    assert!(analysis.result.as_deref().expect("result").contains("20"));
    assert_eq!(result_count(&analysis), 1);
    assert!(analysis.completed_at.is_some());
    assert!(llm.seen_tools().contains(&"compute_statistics".to_string()));

    let second_call = &llm.seen_messages()[1];
    let Some(MessageType::ToolResult(results)) =
        second_call.last().map(|message| &message.message_type)
    else {
        panic!("tool results were not sent back");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "call_1");
    assert!(results[0].function.arguments.contains("\"mean\":20.0"));
}

#[tokio::test]
async fn unknown_tool_is_observed_and_loop_continues() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools("", vec![tool_call("call_1", "summon_oracle", json!({}))]),
        ScriptedTurn::answer("That tool does not exist, answering directly."),
    ]);
    let analysis = conversation(Arc::new(llm), LoopSettings::default())
        .run(Analysis::new("ask the oracle"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert_eq!(
        labels(&analysis),
        vec!["action", "observation", "reasoning", "result"]
    );
    match &analysis.steps[1].kind {
        StepKind::Observation {
            output, is_error, ..
        } => {
            assert!(*is_error);
            assert!(output["error"].as_str().expect("message").contains("unknown tool"));
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[tokio::test]
async fn tool_failure_is_fed_back_as_observation() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools("", vec![tool_call("call_1", "flaky_lookup", json!({}))]),
        ScriptedTurn::answer("The lookup is unavailable."),
    ]);
    let analysis = conversation(Arc::new(llm), LoopSettings::default())
        .run(Analysis::new("q"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Completed);
    assert_eq!(
        analysis.steps[1].kind,
        StepKind::Observation {
            tool_name: "flaky_lookup".to_string(),
            output: json!({ "error": "execution failed: upstream offline" }),
            is_error: true,
        }
    );
}

#[tokio::test]
async fn iteration_cap_stops_before_extra_tool_execution() {
    let llm = ScriptedLLM::repeating(ScriptedTurn::tools(
        "",
        vec![tool_call("call", "echo", json!({ "text": "again" }))],
    ));
    let settings = LoopSettings::default().with_max_iterations(3);
    let analysis = conversation(Arc::new(llm.clone()), settings)
        .run(Analysis::new("loop forever"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Failed);
    assert_eq!(
        analysis.error.as_deref(),
        Some("iteration cap reached (max_iterations=3)")
    );
    let actions = analysis
        .steps
        .iter()
        .filter(|step| matches!(step.kind, StepKind::Action { .. }))
        .count();
    assert_eq!(actions, 3);
    assert_eq!(llm.calls(), 4);
    assert_eq!(result_count(&analysis), 0);
    assert!(analysis.result.is_none());
}

#[tokio::test]
async fn model_failure_marks_analysis_failed() {
    let analysis = conversation(
        Arc::new(FailingLLM::new("rate limited")),
        LoopSettings::default(),
    )
    .run(Analysis::new("q"), &TraceSender::detached())
    .await
    .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Failed);
    assert!(
        analysis
            .error
            .as_deref()
            .expect("reason")
            .contains("rate limited")
    );
    assert!(analysis.steps.is_empty());
}

#[tokio::test]
async fn stalled_model_times_out() {
    let settings = LoopSettings::default().with_model_timeout(Duration::from_millis(50));
    let analysis = conversation(Arc::new(StalledLLM), settings)
        .run(Analysis::new("q"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(analysis.status, AnalysisStatus::Failed);
    assert_eq!(
        analysis.error.as_deref(),
        Some("model call timed out after 50ms")
    );
}

#[tokio::test]
async fn multiple_calls_run_in_requested_order() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools(
            "",
            vec![
                tool_call("a", "echo", json!({ "text": "first" })),
                tool_call("b", "flaky_lookup", json!({})),
                tool_call("c", "echo", json!({ "text": "third" })),
            ],
        ),
        ScriptedTurn::answer("done"),
    ]);
    let analysis = conversation(Arc::new(llm.clone()), LoopSettings::default())
        .run(Analysis::new("q"), &TraceSender::detached())
        .await
        .expect("run");

    let tool_order: Vec<_> = analysis
        .steps
        .iter()
        .filter_map(|step| match &step.kind {
            StepKind::Observation { tool_name, .. } => Some(tool_name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(tool_order, vec!["echo", "flaky_lookup", "echo"]);
    assert_eq!(
        labels(&analysis)[..6],
        ["action", "observation", "action", "observation", "action", "observation"]
    );

    assert_eq!(llm.calls(), 2);
    let second_call = &llm.seen_messages()[1];
    let Some(MessageType::ToolResult(results)) =
        second_call.last().map(|message| &message.message_type)
    else {
        panic!("tool results were not sent back");
    };
    let ids: Vec<_> = results.iter().map(|call| call.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn plan_tools_record_plan_snapshots() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools(
            "Planning first.",
            vec![tool_call(
                "p1",
                "create_analysis_plan",
                json!({ "goal": "compare regions", "steps": ["collect", "compare"] }),
            )],
        ),
        ScriptedTurn::tools(
            "",
            vec![tool_call(
                "p2",
                "update_plan_progress",
                json!({ "step_completed": 0 }),
            )],
        ),
        ScriptedTurn::answer("Regions compared."),
    ]);
    let analysis = conversation(Arc::new(llm), LoopSettings::default())
        .run(Analysis::new("compare regions"), &TraceSender::detached())
        .await
        .expect("run");

    assert_eq!(
        labels(&analysis),
        vec![
            "reasoning",
            "action",
            "observation",
            "plan",
            "action",
            "observation",
            "plan",
            "reasoning",
            "result"
        ]
    );
    let plan = analysis.plan.as_ref().expect("plan");
    assert_eq!(plan.goal, "compare regions");
    assert_eq!(plan.current_step, 1);
    assert_eq!(plan.status, PlanStatus::InProgress);
    match &analysis.steps[6].kind {
        StepKind::Plan { plan: snapshot } => assert_eq!(snapshot, plan),
        other => panic!("unexpected step: {other:?}"),
    }
}

#[tokio::test]
async fn progress_without_plan_is_an_error_observation() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools(
            "",
            vec![tool_call(
                "p1",
                "update_plan_progress",
                json!({ "step_completed": 0 }),
            )],
        ),
        ScriptedTurn::answer("No plan yet."),
    ]);
    let analysis = conversation(Arc::new(llm), LoopSettings::default())
        .run(Analysis::new("q"), &TraceSender::detached())
        .await
        .expect("run");

    assert!(analysis.plan.is_none());
    match &analysis.steps[1].kind {
        StepKind::Observation {
            output, is_error, ..
        } => {
            assert!(*is_error);
            assert!(output["error"].as_str().expect("message").contains("no active plan"));
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[tokio::test]
async fn streamed_steps_match_stored_trace() {
    let llm = ScriptedLLM::new(vec![
        ScriptedTurn::tools(
            "Looking up.",
            vec![tool_call("call_1", "echo", json!({ "text": "hi" }))],
        ),
        ScriptedTurn::answer("Echoed."),
    ]);
    let (trace, mut receiver) = TraceSender::channel(16);
    let analysis = conversation(Arc::new(llm), LoopSettings::default())
        .run(Analysis::new("q"), &trace)
        .await
        .expect("run");
    drop(trace);

    let mut streamed = Vec::new();
    while let Some(step) = receiver.recv().await {
        streamed.push(step);
    }
    assert_eq!(streamed, analysis.steps);
    assert!(
        analysis
            .steps
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
}
