//! Lookup tools: extract_info, list_topic_papers, list_topics.

use serde_json::json;

use super::{McpTool, ToolContext, parse_input, to_json};
use crate::error::{ToolError, ToolResult};
use crate::models::{ExtractInfoInput, ListTopicPapersInput, require_non_empty};
use crate::store::PaperStore;

/// Look up one stored paper by identifier, across all topics.
pub struct ExtractInfoTool;

#[async_trait::async_trait]
impl McpTool for ExtractInfoTool {
    fn name(&self) -> &'static str {
        "extract_info"
    }

    fn description(&self) -> &'static str {
        "Get the stored metadata of a paper by its arXiv identifier, searching every topic."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paper_id": {
                    "type": "string",
                    "description": "arXiv identifier, e.g. 2301.00001v1"
                }
            },
            "required": ["paper_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExtractInfoInput = parse_input(input)?;
        let paper_id = require_non_empty("paper_id", &params.paper_id)?;

        let lookup_id = paper_id.clone();
        let (found, topics) = ctx
            .blocking(move |store| match store.find_by_id(&lookup_id) {
                Some(record) => (Some(record), Vec::new()),
                None => (None, store.list_topics()),
            })
            .await?;

        match found {
            Some(record) => to_json(&record),
            None => Err(ToolError::not_found(format!("paper {paper_id}"), topics)),
        }
    }
}

/// List every paper stored under a topic.
pub struct ListTopicPapersTool;

#[async_trait::async_trait]
impl McpTool for ListTopicPapersTool {
    fn name(&self) -> &'static str {
        "list_topic_papers"
    }

    fn description(&self) -> &'static str {
        "List all papers stored under a topic, newest first."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Topic label"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ListTopicPapersInput = parse_input(input)?;
        let topic = require_non_empty("topic", &params.topic)?;

        let listing = ctx.blocking(move |store| store.list_by_topic(&topic)).await?;
        to_json(&listing)
    }
}

/// List stored topics.
pub struct ListTopicsTool;

#[async_trait::async_trait]
impl McpTool for ListTopicsTool {
    fn name(&self) -> &'static str {
        "list_topics"
    }

    fn description(&self) -> &'static str {
        "List the topics that have stored papers."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, ctx: &ToolContext, _input: serde_json::Value) -> ToolResult<String> {
        let topics = ctx.blocking(PaperStore::list_topics).await?;
        to_json(&json!({
            "total_topics": topics.len(),
            "topics": topics,
        }))
    }
}
