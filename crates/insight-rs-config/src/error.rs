//! Config loading errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read insight config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// A layer passed with `--config` does not exist.
    #[error("config file not found: {}", .0.display())]
    MissingLayer(PathBuf),
    #[error("failed to parse insight config: {0}")]
    ParseFailed(#[from] json5::Error),
    #[error("failed to decode insight config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// Schema violation at a `<layer>:<dotted.path>` location.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    /// Cross-field invariant violated after decoding.
    #[error("invalid config: {0}")]
    Invalid(String),
}
