use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::NaiveDate;
use insight_rs_config::ServerConfig;
use insight_rs_core::InsightHub;
use insight_rs_data::{BankingLedger, ClimateHub};
use insight_rs_server::{AppState, Dataset, router};
use insight_rs_test_utils::{FailingLLM, ScriptedLLM, ScriptedTurn, tool_call};
use insight_rs_tools::{banking_tool_registry, climate_tool_registry};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const SEED: u64 = 42;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("date")
}

fn climate_app(turns: Vec<ScriptedTurn>) -> Router {
    let hub = Arc::new(ClimateHub::generate(SEED, as_of()));
    let dataset = Dataset::Climate(hub.clone());
    let insight = InsightHub::builder(
        Arc::new(ScriptedLLM::new(turns)),
        climate_tool_registry(hub),
    )
    .sources(dataset.sources())
    .build();
    router(AppState::new(insight, dataset), &ServerConfig::default())
}

fn banking_app() -> Router {
    let ledger = Arc::new(BankingLedger::generate(SEED, as_of()));
    let dataset = Dataset::Banking(ledger.clone());
    let insight = InsightHub::builder(
        Arc::new(FailingLLM::new("offline")),
        banking_tool_registry(ledger),
    )
    .sources(dataset.sources())
    .build();
    router(AppState::new(insight, dataset), &ServerConfig::default())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn mean_turns() -> Vec<ScriptedTurn> {
    vec![
        ScriptedTurn::tools(
            "Computing the mean.",
            vec![tool_call(
                "call_1",
                "compute_statistics",
                json!({ "values": [10, 20, 30] }),
            )],
        ),
        ScriptedTurn::answer("The average is 20."),
    ]
}

#[tokio::test]
async fn root_and_health_describe_the_service() {
    let app = climate_app(Vec::new());
    let (status, root) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "running");
    assert_eq!(root["domain"], "climate");
    assert_eq!(root["endpoints"]["countries"], "/api/countries");

    let (status, health) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["analyses_count"], 0);
}

#[tokio::test]
async fn climate_catalog_endpoints() {
    let app = climate_app(Vec::new());
    let (status, sources) = call(&app, Method::GET, "/api/sources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sources.as_array().map(Vec::len), Some(6));

    let (_, countries) = call(&app, Method::GET, "/api/countries", None).await;
    assert_eq!(countries.as_array().map(Vec::len), Some(25));

    let (status, kenya) = call(&app, Method::GET, "/api/country/ken", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kenya["country"]["code"], "KEN");
    assert_eq!(kenya["data"]["country"], "Kenya");

    let (status, missing) = call(&app, Method::GET, "/api/country/XXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(missing["detail"].as_str().expect("detail").contains("XXX"));

    let (status, _) = call(&app, Method::GET, "/api/accounts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tools_endpoint_lists_registered_tools() {
    let app = climate_app(Vec::new());
    let (status, tools) = call(&app, Method::GET, "/api/tools", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = tools
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    assert!(names.contains(&"compute_statistics"));
    assert!(names.contains(&"create_analysis_plan"));
    assert!(names.contains(&"query_bank"));
}

#[tokio::test]
async fn analyze_runs_and_records_history() {
    let app = climate_app(mean_turns());
    let (status, analysis) = call(
        &app,
        Method::POST,
        "/api/analyze",
        Some(json!({ "query": "average of [10, 20, 30]" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["status"], "completed");
    assert_eq!(analysis["result"], "The average is 20.");
    let id = analysis["id"].as_str().expect("id").to_string();

    let (_, history) = call(&app, Method::GET, "/api/history", None).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    let (status, stored) = call(&app, Method::GET, &format!("/api/analysis/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, analysis);

    let (status, cleared) = call(&app, Method::DELETE, "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["removed"], 1);
    let (status, _) = call(&app, Method::GET, &format!("/api/analysis/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_rejects_blank_query() {
    let app = climate_app(Vec::new());
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/analyze",
        Some(json!({ "query": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "query must not be empty");
}

#[tokio::test]
async fn unknown_analysis_is_not_found() {
    let app = climate_app(Vec::new());
    let (status, body) = call(
        &app,
        Method::GET,
        "/api/analysis/00000000-0000-4000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().expect("detail").contains("not found"));
}

#[tokio::test]
async fn banking_domain_serves_accounts_and_failed_analyses() {
    let app = banking_app();
    let (_, root) = call(&app, Method::GET, "/", None).await;
    assert_eq!(root["domain"], "banking");

    let (status, accounts) = call(&app, Method::GET, "/api/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!accounts["accounts"].as_array().expect("accounts").is_empty());

    let (status, _) = call(&app, Method::GET, "/api/countries", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, demos) = call(&app, Method::GET, "/api/demo-queries", None).await;
    assert_eq!(demos[0]["category"], "balances");

    let (status, analysis) = call(
        &app,
        Method::POST,
        "/api/analyze",
        Some(json!({ "query": "How much money do I have?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["status"], "failed");
    assert!(analysis["error"].as_str().expect("error").contains("offline"));
}
