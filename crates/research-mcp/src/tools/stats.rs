//! Store statistics and maintenance: get_database_stats, cleanup_empty_topics.

use serde_json::json;

use super::{McpTool, ToolContext, to_json};
use crate::error::ToolResult;
use crate::store::PaperStore;

/// Aggregate statistics over all stored topics.
pub struct DatabaseStatsTool;

#[async_trait::async_trait]
impl McpTool for DatabaseStatsTool {
    fn name(&self) -> &'static str {
        "get_database_stats"
    }

    fn description(&self) -> &'static str {
        "Summarize the paper store: number of topics and papers, and per-topic \
         counts with publication date ranges."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, ctx: &ToolContext, _input: serde_json::Value) -> ToolResult<String> {
        to_json(&ctx.blocking(PaperStore::database_stats).await?)
    }
}

/// Remove topic directories that hold no papers.
pub struct CleanupEmptyTopicsTool;

#[async_trait::async_trait]
impl McpTool for CleanupEmptyTopicsTool {
    fn name(&self) -> &'static str {
        "cleanup_empty_topics"
    }

    fn description(&self) -> &'static str {
        "Delete topic directories that are empty or contain no stored papers."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, ctx: &ToolContext, _input: serde_json::Value) -> ToolResult<String> {
        let removed = ctx.blocking(PaperStore::cleanup_empty_topics).await?;
        to_json(&json!({ "removed_topics": removed }))
    }
}
