//! Locating and reading config layers on disk.

use super::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigLayer, ConfigLayerSource, LayeredConfigOptions,
    LoadedLayer, schema,
};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A place a layer may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Candidate {
    pub(super) source: ConfigLayerSource,
    pub(super) path: PathBuf,
    /// Runtime layers must exist; the rest are skipped when absent.
    pub(super) required: bool,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            ConfigLayerSource::System => "system",
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Project => "project",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

/// Candidate layers in precedence order (low -> high), without duplicates.
pub(super) fn candidates(options: &LayeredConfigOptions) -> Result<Vec<Candidate>, ConfigError> {
    let cwd = match options.cwd.canonicalize() {
        Ok(path) => path,
        Err(err) if err.kind() == ErrorKind::NotFound => options.cwd.clone(),
        Err(err) => return Err(err.into()),
    };

    let mut ordered: Vec<(ConfigLayerSource, PathBuf, bool)> = Vec::new();
    if let Some(path) = &options.system_config_path {
        ordered.push((ConfigLayerSource::System, path.clone(), false));
    }
    if let Some(path) = &options.user_config_path {
        ordered.push((ConfigLayerSource::User, path.clone(), false));
    }
    let project_root = cwd.ancestors().find(|dir| {
        options
            .project_root_markers
            .iter()
            .any(|marker| dir.join(marker).exists())
    });
    match project_root {
        Some(root) => ordered.push((ConfigLayerSource::Project, root.join(CONFIG_FILE_NAME), false)),
        None => debug!("no project root above {}", cwd.display()),
    }
    ordered.push((ConfigLayerSource::Cwd, cwd.join(CONFIG_FILE_NAME), false));
    for path in &options.runtime_paths {
        ordered.push((ConfigLayerSource::Runtime, path.clone(), true));
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(ordered.len());
    for (source, path, required) in ordered {
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        // Runtime layers always apply, even when they repeat a discovered file.
        if !seen.insert(key) && !required {
            debug!(
                "skipping duplicate layer (source={}, path={})",
                source.label(),
                path.display()
            );
            continue;
        }
        out.push(Candidate {
            source,
            path,
            required,
        });
    }
    Ok(out)
}

/// Read and schema-check a candidate; `None` for an absent optional layer.
pub(super) fn read(candidate: &Candidate) -> Result<Option<LoadedLayer>, ConfigError> {
    let contents = match fs::read_to_string(&candidate.path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if candidate.required {
                return Err(ConfigError::MissingLayer(candidate.path.clone()));
            }
            debug!(
                "config layer absent (source={}, path={})",
                candidate.source.label(),
                candidate.path.display()
            );
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let value: Value = json5::from_str(&contents)?;
    let label = format!("{}({})", candidate.source.label(), candidate.path.display());
    schema::validate_layer_schema(&value, &label)?;
    debug!(
        "read config layer (source={}, bytes={})",
        candidate.source.label(),
        contents.len()
    );
    Ok(Some(LoadedLayer {
        meta: ConfigLayer {
            source: candidate.source,
            path: candidate.path.clone(),
        },
        value,
    }))
}

/// `/etc/insight/insight.json5` on Unix.
pub(super) fn system_config_path() -> Option<PathBuf> {
    if cfg!(unix) {
        Some(Path::new("/etc").join("insight").join(CONFIG_FILE_NAME))
    } else {
        None
    }
}

/// `~/.insight/insight.json5`.
pub(super) fn user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
