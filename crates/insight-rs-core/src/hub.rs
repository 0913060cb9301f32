//! `InsightHub` facade: runs analyses and owns their history.

use crate::analysis::{ConversationLoop, LoopSettings, TraceSender};
use crate::error::InsightCoreError;
use crate::history::HistoryStore;
use autoagents_llm::LLMProvider;
use insight_rs_protocol::{Analysis, AnalysisId, DataSource, Step};
use insight_rs_tools::{ToolRegistry, ToolSpec};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

const DEFAULT_STREAM_BUFFER: usize = 512;

/// Streaming analysis handle.
///
/// Steps arrive on `steps` in production order. Dropping `steps` before the
/// analysis finishes cancels it and nothing is written to history.
pub struct AnalysisStream {
    /// Analysis identifier.
    pub analysis_id: AnalysisId,
    /// Query text as submitted.
    pub query: String,
    /// Step stream.
    pub steps: ReceiverStream<Step>,
    /// Join handle for the background task.
    handle: JoinHandle<Result<Analysis, InsightCoreError>>,
}

impl AnalysisStream {
    /// Await the terminal analysis.
    pub async fn finish(self) -> Result<Analysis, InsightCoreError> {
        // `_steps` keeps the receiver attached until the loop ends.
        let (_steps, completion) = self.into_parts();
        completion.finish().await
    }

    /// Split into the step stream and a future-like completion handle.
    pub fn into_parts(self) -> (ReceiverStream<Step>, AnalysisCompletion) {
        (
            self.steps,
            AnalysisCompletion {
                analysis_id: self.analysis_id,
                handle: self.handle,
            },
        )
    }
}

/// Completion half of a split `AnalysisStream`.
pub struct AnalysisCompletion {
    pub analysis_id: AnalysisId,
    handle: JoinHandle<Result<Analysis, InsightCoreError>>,
}

impl AnalysisCompletion {
    pub async fn finish(self) -> Result<Analysis, InsightCoreError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(InsightCoreError::Executor(err.to_string())),
        }
    }
}

/// Entry point used by the server and CLI.
#[derive(Clone)]
pub struct InsightHub {
    conversation: ConversationLoop,
    tools: ToolRegistry,
    history: HistoryStore,
    sources: Arc<Vec<DataSource>>,
    stream_buffer: usize,
}

impl InsightHub {
    /// Start building a hub for a provider and tool registry.
    pub fn builder(llm: Arc<dyn LLMProvider>, tools: ToolRegistry) -> InsightHubBuilder {
        InsightHubBuilder::new(llm, tools)
    }

    /// Run an analysis to completion without streaming.
    pub async fn analyze(&self, query: impl Into<String>) -> Result<Analysis, InsightCoreError> {
        let analysis = Analysis::new(query);
        info!(
            "running analysis (analysis_id={}, mode=blocking)",
            analysis.id
        );
        let analysis = self
            .conversation
            .run(analysis, &TraceSender::detached())
            .await?;
        self.history.append(analysis.clone())?;
        Ok(analysis)
    }

    /// Start an analysis in the background and stream its steps.
    ///
    /// The terminal analysis is appended to history only if the step stream
    /// is still attached when the loop finishes.
    pub fn analyze_stream(&self, query: impl Into<String>) -> AnalysisStream {
        let analysis = Analysis::new(query);
        let analysis_id = analysis.id;
        let query = analysis.query.clone();
        info!(
            "running analysis (analysis_id={}, mode=stream, buffer={})",
            analysis_id, self.stream_buffer
        );
        let (trace, receiver) = TraceSender::channel(self.stream_buffer);
        let conversation = self.conversation.clone();
        let history = self.history.clone();
        let handle = tokio::spawn(async move {
            let result = conversation.run(analysis, &trace).await;
            match result {
                Ok(analysis) => {
                    trace.ensure_attached()?;
                    history.append(analysis.clone())?;
                    Ok(analysis)
                }
                Err(err) => {
                    warn!(
                        "analysis abandoned (analysis_id={}, error={})",
                        analysis_id, err
                    );
                    Err(err)
                }
            }
        });

        AnalysisStream {
            analysis_id,
            query,
            steps: ReceiverStream::new(receiver),
            handle,
        }
    }

    /// Stored analyses, most recent first.
    pub fn history(&self) -> Vec<Analysis> {
        self.history.list()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Look up a stored analysis.
    pub fn analysis(&self, id: AnalysisId) -> Result<Analysis, InsightCoreError> {
        self.history
            .get(id)
            .ok_or(InsightCoreError::UnknownAnalysis(id))
    }

    /// Remove stored analyses; running ones are unaffected.
    pub fn clear_history(&self) -> Result<usize, InsightCoreError> {
        self.history.clear()
    }

    /// Configured data source metadata.
    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    /// Specs of every registered tool, sorted by name.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.specs()
    }

    pub fn settings(&self) -> &LoopSettings {
        self.conversation.settings()
    }
}

impl std::fmt::Debug for InsightHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightHub")
            .field("tools", &self.tools)
            .field("history", &self.history)
            .field("sources", &self.sources.len())
            .finish()
    }
}

/// Builder for `InsightHub`.
pub struct InsightHubBuilder {
    llm: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    settings: LoopSettings,
    history: HistoryStore,
    sources: Vec<DataSource>,
    stream_buffer: usize,
}

impl InsightHubBuilder {
    fn new(llm: Arc<dyn LLMProvider>, tools: ToolRegistry) -> Self {
        Self {
            llm,
            tools,
            settings: LoopSettings::default(),
            history: HistoryStore::new(),
            sources: Vec::new(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }

    pub fn settings(mut self, settings: LoopSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn history(mut self, history: HistoryStore) -> Self {
        self.history = history;
        self
    }

    pub fn sources(mut self, sources: Vec<DataSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Capacity of each analysis step channel; clamped to at least 1.
    pub fn stream_buffer(mut self, stream_buffer: usize) -> Self {
        self.stream_buffer = stream_buffer.max(1);
        self
    }

    pub fn build(self) -> InsightHub {
        debug!(
            "building insight hub (tools={}, sources={}, max_iterations={})",
            self.tools.len(),
            self.sources.len(),
            self.settings.max_iterations
        );
        InsightHub {
            conversation: ConversationLoop::new(self.llm, self.tools.clone(), self.settings),
            tools: self.tools,
            history: self.history,
            sources: Arc::new(self.sources),
            stream_buffer: self.stream_buffer,
        }
    }
}
