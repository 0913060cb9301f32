//! History persistence for Insight using a JSONL log.

use insight_rs_protocol::Analysis;
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the history log inside the history root.
pub const HISTORY_FILE: &str = "history.jsonl";

const SCHEMA_VERSION: u32 = 1;

/// Persistent backend for terminal analyses.
pub trait HistoryBackend: Send + Sync {
    /// Append one terminal analysis.
    fn append(&self, analysis: &Analysis) -> Result<(), StateError>;
    /// Load every stored analysis in append order.
    fn load_all(&self) -> Result<Vec<Analysis>, StateError>;
    /// Remove every stored analysis.
    fn clear(&self) -> Result<(), StateError>;
}

/// Errors returned by the history backend.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported schema version: {0}")]
    UnsupportedSchema(u32),
    #[error("missing schema header")]
    MissingHeader,
}

/// Internal JSONL record representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HistoryRecord {
    SchemaVersion { version: u32 },
    Analysis { analysis: Box<Analysis> },
}

/// JSONL-backed history store.
pub struct JsonlHistoryStore {
    path: PathBuf,
    /// Serialize writes to the log file.
    write_lock: Mutex<()>,
}

impl JsonlHistoryStore {
    /// Open (or create) `history.jsonl` under `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StateError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let store = Self {
            path: root.join(HISTORY_FILE),
            write_lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.write_header()?;
        }
        info!(
            "initialized JSONL history store (path={})",
            store.path.display()
        );
        Ok(store)
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&self) -> Result<(), StateError> {
        let mut file = File::create(&self.path)?;
        let header = serde_json::to_string(&HistoryRecord::SchemaVersion {
            version: SCHEMA_VERSION,
        })?;
        writeln!(file, "{header}")?;
        Ok(())
    }
}

impl HistoryBackend for JsonlHistoryStore {
    fn append(&self, analysis: &Analysis) -> Result<(), StateError> {
        let record = HistoryRecord::Analysis {
            analysis: Box::new(analysis.clone()),
        };
        // One line per analysis, so a record is either fully written or absent.
        let line = serde_json::to_string(&record)?;
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        debug!(
            "appended analysis record (analysis_id={}, steps={}, bytes={})",
            analysis.id,
            analysis.steps.len(),
            line.len()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Analysis>, StateError> {
        let file = OpenOptions::new().read(true).open(&self.path)?;
        let reader = BufReader::new(file);
        let mut version = None;
        let mut analyses = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryRecord>(&line)? {
                HistoryRecord::SchemaVersion { version: found } => {
                    if found > SCHEMA_VERSION {
                        return Err(StateError::UnsupportedSchema(found));
                    }
                    version = Some(found);
                }
                HistoryRecord::Analysis { analysis } => {
                    if version.is_none() {
                        return Err(StateError::MissingHeader);
                    }
                    analyses.push(*analysis);
                }
            }
        }
        if version.is_none() {
            warn!("history log has no schema header (path={})", self.path.display());
            return Err(StateError::MissingHeader);
        }
        Ok(analyses)
    }

    fn clear(&self) -> Result<(), StateError> {
        let _guard = self.write_lock.lock();
        info!("clearing history log (path={})", self.path.display());
        self.write_header()
    }
}
