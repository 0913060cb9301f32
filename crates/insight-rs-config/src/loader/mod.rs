//! Layered configuration loader.
//!
//! Discovers configuration layers (system/user/project/cwd/runtime), validates
//! each against the schema, merges them, and produces a final `InsightConfig`.

mod discovery;
mod merge;
mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, InsightConfig};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "insight.json5";
const CONFIG_DIR_NAME: &str = ".insight";
const PROJECT_ROOT_MARKERS: &[&str] = &[".git"];

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: InsightConfig,
    /// Metadata for each layer that contributed.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// System-wide configuration.
    System,
    /// User-specific configuration.
    User,
    /// Project root configuration.
    Project,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to resolve local layers.
    pub cwd: PathBuf,
    /// Optional system config path (defaults to `/etc/insight/insight.json5` on Unix).
    pub system_config_path: Option<PathBuf>,
    /// Optional user config path (defaults to `~/.insight/insight.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: discovery::system_config_path(),
            user_config_path: discovery::user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl InsightConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations and overrides.
    ///
    /// Layer precedence (low -> high): system, user, project, cwd, runtime.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());
        for candidate in discovery::candidates(&options)? {
            let Some(loaded) = discovery::read(&candidate)? else {
                continue;
            };
            merge::merge_json_values(&mut merged, &loaded.value);
            layers.push(loaded.meta);
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "agent.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.agent.stream_buffer == 0 {
            return Err(ConfigError::Invalid(
                "agent.stream_buffer must be at least 1".to_string(),
            ));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "model.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "model.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

fn config_from_value(value: Value, label: &str) -> Result<InsightConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: InsightConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
