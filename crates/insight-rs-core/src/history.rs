//! In-memory history of terminal analyses with optional persistence.

use crate::error::InsightCoreError;
use crate::state::{HistoryBackend, JsonlHistoryStore};
use directories::BaseDirs;
use insight_rs_config::HistoryConfig;
use insight_rs_protocol::{Analysis, AnalysisId};
use log::{debug, info};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// Append-only store of completed and failed analyses.
///
/// Reads take a shared lock; appends and clears are serialized by the write
/// lock, which is also held while the backend writes so the file and the
/// in-memory order never diverge.
#[derive(Clone, Default)]
pub struct HistoryStore {
    entries: Arc<RwLock<Vec<Analysis>>>,
    backend: Option<Arc<dyn HistoryBackend>>,
}

impl HistoryStore {
    /// Create an in-memory history store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store backed by `backend`, loading its existing entries.
    pub fn with_backend(backend: Arc<dyn HistoryBackend>) -> Result<Self, InsightCoreError> {
        let entries = backend.load_all().map_err(history_error)?;
        info!("loaded analysis history (entries={})", entries.len());
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            backend: Some(backend),
        })
    }

    /// Append a terminal analysis.
    pub fn append(&self, analysis: Analysis) -> Result<(), InsightCoreError> {
        if !analysis.is_terminal() {
            return Err(InsightCoreError::History(format!(
                "analysis {} is still running",
                analysis.id
            )));
        }
        let mut entries = self.entries.write();
        if let Some(backend) = &self.backend {
            backend.append(&analysis).map_err(history_error)?;
        }
        debug!(
            "appended analysis to history (analysis_id={}, status={:?}, entries={})",
            analysis.id,
            analysis.status,
            entries.len() + 1
        );
        entries.push(analysis);
        Ok(())
    }

    /// All stored analyses, most recent first.
    pub fn list(&self) -> Vec<Analysis> {
        self.entries.read().iter().rev().cloned().collect()
    }

    /// Look up a stored analysis by id.
    pub fn get(&self, id: AnalysisId) -> Option<Analysis> {
        self.entries
            .read()
            .iter()
            .find(|analysis| analysis.id == id)
            .cloned()
    }

    /// Remove every stored analysis and return how many were removed.
    pub fn clear(&self) -> Result<usize, InsightCoreError> {
        let mut entries = self.entries.write();
        if let Some(backend) = &self.backend {
            backend.clear().map_err(history_error)?;
        }
        let removed = entries.len();
        entries.clear();
        info!("cleared analysis history (removed={})", removed);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.len())
            .field("persistent", &self.backend.is_some())
            .finish()
    }
}

/// Build the history store described by config.
pub fn build_history_store(config: &HistoryConfig) -> Result<HistoryStore, InsightCoreError> {
    if !config.enabled {
        debug!("history persistence disabled");
        return Ok(HistoryStore::new());
    }
    let root = resolve_history_root(config.path.as_deref())?;
    info!("initializing history store (root={})", root.display());
    let backend = JsonlHistoryStore::new(root).map_err(history_error)?;
    HistoryStore::with_backend(Arc::new(backend))
}

/// Resolve the history directory: explicit path (relative to cwd), then
/// `~/.insight/history`, then `./.insight/history`.
fn resolve_history_root(path: Option<&str>) -> Result<PathBuf, InsightCoreError> {
    let cwd = std::env::current_dir()?;
    if let Some(path) = path {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return Ok(path);
        }
        debug!(
            "resolving history root relative to cwd: {}",
            cwd.join(&path).display()
        );
        return Ok(cwd.join(path));
    }
    if let Some(home) = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) {
        return Ok(home.join(".insight").join("history"));
    }
    Ok(cwd.join(".insight").join("history"))
}

fn history_error(err: impl std::fmt::Display) -> InsightCoreError {
    InsightCoreError::History(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{HistoryStore, build_history_store};
    use crate::error::InsightCoreError;
    use crate::state::JsonlHistoryStore;
    use insight_rs_config::HistoryConfig;
    use insight_rs_protocol::Analysis;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn finished(query: &str) -> Analysis {
        let mut analysis = Analysis::new(query);
        analysis.complete(format!("answer to {query}"));
        analysis
    }

    #[test]
    fn list_is_most_recent_first() {
        let store = HistoryStore::new();
        let first = finished("first");
        let second = finished("second");
        store.append(first.clone()).expect("first");
        store.append(second.clone()).expect("second");

        let queries: Vec<_> = store.list().into_iter().map(|a| a.query).collect();
        assert_eq!(queries, vec!["second".to_string(), "first".to_string()]);
        assert_eq!(store.get(first.id), Some(first));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn running_analyses_are_rejected() {
        let store = HistoryStore::new();
        let err = store.append(Analysis::new("pending")).expect_err("running");
        assert!(matches!(err, InsightCoreError::History(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_reports_removed_count() {
        let store = HistoryStore::new();
        store.append(finished("a")).expect("a");
        store.append(finished("b")).expect("b");
        assert_eq!(store.clear().expect("clear"), 2);
        assert!(store.list().is_empty());
        assert_eq!(store.clear().expect("clear again"), 0);
    }

    #[test]
    fn persisted_entries_survive_reopen() {
        let temp = tempdir().expect("tempdir");
        let stored = finished("persisted");
        {
            let backend = JsonlHistoryStore::new(temp.path()).expect("backend");
            let store = HistoryStore::with_backend(Arc::new(backend)).expect("store");
            store.append(stored.clone()).expect("append");
        }

        let backend = JsonlHistoryStore::new(temp.path()).expect("backend");
        let store = HistoryStore::with_backend(Arc::new(backend)).expect("reopen");
        assert_eq!(store.get(stored.id), Some(stored));
    }

    #[test]
    fn config_enables_jsonl_backend() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("history");
        let config = HistoryConfig {
            enabled: true,
            path: Some(root.display().to_string()),
        };
        let store = build_history_store(&config).expect("store");
        store.append(finished("q")).expect("append");
        assert!(root.join("history.jsonl").exists());

        let disabled = build_history_store(&HistoryConfig::default()).expect("memory");
        assert!(disabled.is_empty());
    }
}
