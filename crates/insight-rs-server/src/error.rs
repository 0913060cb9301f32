//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use insight_rs_core::InsightCoreError;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Errors returned by HTTP handlers, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InsightCoreError> for ApiError {
    fn from(err: InsightCoreError) -> Self {
        match err {
            InsightCoreError::UnknownAnalysis(id) => {
                ApiError::NotFound(format!("analysis {id} not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed (status={}, error={})", status.as_u16(), self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
