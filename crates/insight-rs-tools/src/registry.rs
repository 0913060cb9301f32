//! Registry for tool implementations.

use crate::context::ToolContext;
use crate::output::ToolOutput;
use crate::tool::{Tool, ToolSpec};
use insight_rs_protocol::ToolError;
use log::{debug, warn};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory registry for tool implementations.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    /// Map of tool name to implementation.
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool by name, replacing any tool with the same name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        debug!("registering tool (name={})", tool.name());
        self.tools.write().insert(tool.name().to_string(), tool);
    }

    /// Fetch a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// List all registered tool names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Return all registered tool instances.
    pub fn all(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().values().cloned().collect()
    }

    /// Return tool specs for all registered tools, sorted by name.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<_> = self.tools.read().values().map(|tool| tool.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.read().is_empty()
    }

    /// Look up `name` and invoke it.
    pub fn execute(
        &self,
        name: &str,
        ctx: &ToolContext,
        args: Value,
    ) -> Result<ToolOutput, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!(
                "tool not found (analysis_id={}, name={})",
                ctx.analysis_id, name
            );
            return Err(ToolError::UnknownTool(name.to_string()));
        };
        debug!(
            "executing tool (analysis_id={}, name={})",
            ctx.analysis_id, name
        );
        tool.call(ctx, args)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list())
            .finish()
    }
}
