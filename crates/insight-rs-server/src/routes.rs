//! REST handlers.

use crate::error::ApiError;
use crate::state::{AppState, Dataset};
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use insight_rs_config::Domain;
use insight_rs_data::{COUNTRIES, Country};
use insight_rs_protocol::{Analysis, AnalysisId, DataSource};
use insight_rs_tools::ToolSpec;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct CountrySummary {
    pub code: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub income_level: &'static str,
    pub population_millions: f64,
}

impl From<&Country> for CountrySummary {
    fn from(country: &Country) -> Self {
        Self {
            code: country.code,
            name: country.name,
            region: country.region,
            income_level: country.income.as_str(),
            population_millions: country.population_millions,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoQuery {
    pub id: u32,
    pub query: &'static str,
    pub category: &'static str,
}

const CLIMATE_DEMO_QUERIES: &[(&str, &str)] = &[
    (
        "Analyse the gender-climate situation in Kenya and compare it with Sweden.",
        "comparison",
    ),
    (
        "Cross-reference climate vulnerability and gender inequality across Africa.",
        "cross_reference",
    ),
    (
        "Compute the correlation between HDI and the gender climate score for all countries.",
        "computation",
    ),
    (
        "Write a policy brief for Indonesia with concrete recommendations.",
        "policy",
    ),
    (
        "Which countries have the largest unpaid care gap and how does it relate to climate vulnerability?",
        "analysis",
    ),
    (
        "What is the average gender climate score for low-income versus high-income countries?",
        "statistics",
    ),
];

const BANKING_DEMO_QUERIES: &[(&str, &str)] = &[
    ("How much money do I have across all my accounts?", "balances"),
    ("Where did most of my money go in the last 30 days?", "spending"),
    ("Are there any unusual transactions I should look at?", "anomalies"),
    ("Which merchants do I spend the most at?", "merchants"),
    ("How much could I realistically save each month?", "savings"),
    ("Give me a report for last month.", "report"),
];

pub(crate) fn demo_queries(domain: Domain) -> Vec<DemoQuery> {
    let queries = match domain {
        Domain::Climate => CLIMATE_DEMO_QUERIES,
        Domain::Banking => BANKING_DEMO_QUERIES,
    };
    queries
        .iter()
        .zip(1..)
        .map(|(&(query, category), id)| DemoQuery {
            id,
            query,
            category,
        })
        .collect()
}

pub(crate) async fn root(State(state): State<AppState>) -> Json<Value> {
    let mut endpoints = json!({
        "data_sources": "/api/sources",
        "tools": "/api/tools",
        "analyze": "POST /api/analyze",
        "history": "/api/history",
        "demo_queries": "/api/demo-queries",
        "websocket": "WS /ws/analyze",
    });
    let extra: &[(&str, &str)] = match state.domain() {
        Domain::Climate => &[
            ("countries", "/api/countries"),
            ("country", "/api/country/{code}"),
        ],
        Domain::Banking => &[("accounts", "/api/accounts")],
    };
    if let Some(map) = endpoints.as_object_mut() {
        for (name, path) in extra {
            map.insert(name.to_string(), json!(path));
        }
    }
    Json(json!({
        "name": "Insight",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "domain": state.domain().as_str(),
        "endpoints": endpoints,
    }))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "uptime_secs": (Utc::now() - state.started_at).num_seconds(),
        "analyses_count": state.hub.history_len(),
    }))
}

pub(crate) async fn sources(State(state): State<AppState>) -> Json<Vec<DataSource>> {
    Json(state.hub.sources().to_vec())
}

pub(crate) async fn tools(State(state): State<AppState>) -> Json<Vec<ToolSpec>> {
    Json(state.hub.tool_specs())
}

pub(crate) async fn countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    match state.dataset {
        Dataset::Climate(_) => Ok(Json(COUNTRIES.iter().map(CountrySummary::from).collect())),
        Dataset::Banking(_) => Err(not_in_domain("countries", Domain::Banking)),
    }
}

pub(crate) async fn country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let Dataset::Climate(hub) = &state.dataset else {
        return Err(not_in_domain("country profiles", Domain::Banking));
    };
    let records = hub
        .records(code.trim())
        .ok_or_else(|| ApiError::NotFound(format!("country '{code}' not found")))?;
    let profile = hub
        .country_profile(records.country.code)
        .ok_or_else(|| ApiError::NotFound(format!("country '{code}' not found")))?;
    Ok(Json(json!({
        "country": CountrySummary::from(records.country),
        "data": profile,
    })))
}

pub(crate) async fn accounts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let Dataset::Banking(ledger) = &state.dataset else {
        return Err(not_in_domain("accounts", Domain::Climate));
    };
    Ok(Json(json!({
        "accounts": ledger.accounts(),
        "total_balance_czk": insight_rs_data::round_to(ledger.total_balance_czk(), 2),
        "as_of": ledger.as_of(),
    })))
}

pub(crate) async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Analysis>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }
    let analysis = state.hub.analyze(query).await?;
    Ok(Json(analysis))
}

pub(crate) async fn history(State(state): State<AppState>) -> Json<Vec<Analysis>> {
    Json(state.hub.history())
}

pub(crate) async fn clear_history(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let removed = state.hub.clear_history()?;
    info!("history cleared via api (removed={})", removed);
    Ok(Json(json!({ "status": "history cleared", "removed": removed })))
}

pub(crate) async fn analysis(
    State(state): State<AppState>,
    Path(id): Path<AnalysisId>,
) -> Result<Json<Analysis>, ApiError> {
    Ok(Json(state.hub.analysis(id)?))
}

pub(crate) async fn demo_queries_handler(State(state): State<AppState>) -> Json<Vec<DemoQuery>> {
    Json(demo_queries(state.domain()))
}

fn not_in_domain(what: &str, domain: Domain) -> ApiError {
    ApiError::NotFound(format!("{what} are not available in the {} domain", domain.as_str()))
}

#[cfg(test)]
mod tests {
    use super::demo_queries;
    use insight_rs_config::Domain;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_queries_are_numbered_per_domain() {
        let climate = demo_queries(Domain::Climate);
        assert_eq!(climate.len(), 6);
        assert_eq!(climate[0].id, 1);
        assert_eq!(climate[0].category, "comparison");
        let banking = demo_queries(Domain::Banking);
        assert_eq!(banking.last().map(|query| query.id), Some(6));
        assert!(banking.iter().all(|query| !query.query.is_empty()));
    }
}
