//! HTTP and WebSocket surface for Insight.

mod error;
mod routes;
mod state;
mod ws;

pub use error::ApiError;
pub use routes::{CountrySummary, DemoQuery, QueryRequest};
pub use state::{AppState, Dataset};

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use insight_rs_config::ServerConfig;
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/api/sources", get(routes::sources))
        .route("/api/tools", get(routes::tools))
        .route("/api/countries", get(routes::countries))
        .route("/api/country/{code}", get(routes::country))
        .route("/api/accounts", get(routes::accounts))
        .route("/api/analyze", post(routes::analyze))
        .route(
            "/api/history",
            get(routes::history).delete(routes::clear_history),
        )
        .route("/api/analysis/{id}", get(routes::analysis))
        .route("/api/demo-queries", get(routes::demo_queries_handler))
        .route("/ws/analyze", get(ws::analyze_ws))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` from the config and serve until the process exits.
pub async fn serve(state: AppState, config: &ServerConfig) -> std::io::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!(
        "insight server listening (address={}, domain={})",
        listener.local_addr()?,
        state.domain().as_str()
    );
    axum::serve(listener, router(state, config)).await
}

/// An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ignoring invalid cors origin (origin={}, error={})", origin, err);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
