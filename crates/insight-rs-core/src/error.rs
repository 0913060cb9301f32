//! Error types for the core analysis crate.

use insight_rs_protocol::AnalysisId;
use thiserror::Error;

/// Errors returned by hub and history operations.
///
/// Model failures, timeouts and the iteration cap are recorded on the
/// analysis itself and never surface here.
#[derive(Debug, Error)]
pub enum InsightCoreError {
    /// Analysis id is unknown to the history store.
    #[error("unknown analysis: {0}")]
    UnknownAnalysis(AnalysisId),
    /// History store error.
    #[error("history error: {0}")]
    History(String),
    /// Analysis task error.
    #[error("executor error: {0}")]
    Executor(String),
    /// The step consumer went away before the analysis finished.
    #[error("analysis cancelled: step consumer disconnected")]
    Cancelled,
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
