//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its input parameters
//! 2. Calls the search adapter and/or the paper store
//! 3. Returns pretty-printed JSON
//!
//! Anticipated failures (bad input, unknown paper, unsupported export format)
//! are rendered as an [`ErrorResponse`] payload by [`invoke`]; adapter and
//! storage faults propagate as errors.

mod export;
mod info;
mod search;
mod stats;

pub use export::*;
pub use info::*;
pub use search::*;
pub use stats::*;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::PaperSource;
use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use crate::models::ErrorResponse;
use crate::store::PaperStore;

/// Tool execution context.
#[derive(Clone)]
pub struct ToolContext {
    /// Runtime configuration.
    pub config: Arc<Config>,
    /// Paper store.
    pub store: Arc<PaperStore>,
    /// Search adapter.
    pub source: Arc<dyn PaperSource>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(config: Arc<Config>, store: Arc<PaperStore>, source: Arc<dyn PaperSource>) -> Self {
        Self { config, store, source }
    }

    /// Run blocking store I/O on the blocking thread pool.
    pub async fn blocking<T, F>(&self, f: F) -> ToolResult<T>
    where
        F: FnOnce(&PaperStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| ToolError::internal(format!("store task failed: {e}")))
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("store", &self.store.root())
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Search (2)
        Box::new(search::SearchPapersTool),
        Box::new(search::TitleSearchTool),
        // Lookup and listing (3)
        Box::new(info::ExtractInfoTool),
        Box::new(info::ListTopicPapersTool),
        Box::new(info::ListTopicsTool),
        // Statistics and maintenance (2)
        Box::new(stats::DatabaseStatsTool),
        Box::new(stats::CleanupEmptyTopicsTool),
        // Export (1)
        Box::new(export::ExportPaperTool),
    ]
}

/// Run a tool, turning anticipated failures into an [`ErrorResponse`] payload.
///
/// # Errors
///
/// Returns adapter, storage, serialization and internal errors unchanged.
pub async fn invoke(
    tool: &dyn McpTool,
    ctx: &ToolContext,
    input: serde_json::Value,
) -> ToolResult<String> {
    match tool.execute(ctx, input).await {
        Err(err) if err.is_expected() => {
            tracing::info!(tool = tool.name(), error = %err, "Tool returned an error payload");
            to_json(&ErrorResponse::from(&err))
        }
        other => other,
    }
}

/// Deserialize tool arguments; malformed arguments are a validation error.
pub(crate) fn parse_input<T: DeserializeOwned>(input: serde_json::Value) -> ToolResult<T> {
    serde_json::from_value(input).map_err(|e| ToolError::validation("arguments", e.to_string()))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
