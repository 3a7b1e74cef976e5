//! Search tools: search_papers, search_papers_by_title.

use chrono::Utc;
use serde_json::json;

use super::{McpTool, ToolContext, parse_input, to_json};
use crate::error::{StoreError, ToolResult};
use crate::models::{SearchPapersInput, SearchResult, TitleSearchInput, require_non_empty};

/// Search arXiv for a topic and store new papers under it.
pub struct SearchPapersTool;

#[async_trait::async_trait]
impl McpTool for SearchPapersTool {
    fn name(&self) -> &'static str {
        "search_papers"
    }

    fn description(&self) -> &'static str {
        "Search arXiv for papers on a topic and store their metadata under that topic. \
         Papers already stored are kept as they are. Returns the identifiers found."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Topic to search for"
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of results (default 5, capped by server limit)"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchPapersInput = parse_input(input)?;
        let topic = require_non_empty("topic", &params.topic)?;
        let max_results = ctx.config.clamp_max_results(params.max_results);

        tracing::info!(topic = %topic, max_results, source = ctx.source.name(), "Searching for papers");
        let candidates = ctx.source.search(&topic, max_results).await?;
        let paper_ids: Vec<String> = candidates.iter().map(|p| p.paper_id().to_string()).collect();

        let store_topic = topic.clone();
        let (new_papers, saved_to) = ctx
            .blocking(move |store| {
                let (_, added) = store.upsert_from_search(&store_topic, candidates)?;
                Ok::<_, StoreError>((added, store.collection_path(&store_topic)))
            })
            .await??;

        to_json(&SearchResult {
            total_found: paper_ids.len(),
            paper_ids,
            new_papers,
            saved_to,
            topic,
            timestamp: Utc::now(),
        })
    }
}

/// Case-insensitive title search across stored papers.
pub struct TitleSearchTool;

#[async_trait::async_trait]
impl McpTool for TitleSearchTool {
    fn name(&self) -> &'static str {
        "search_papers_by_title"
    }

    fn description(&self) -> &'static str {
        "Search stored papers whose title contains the query (case-insensitive). \
         Matches near the start of the title rank first."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to look for in paper titles"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: TitleSearchInput = parse_input(input)?;
        let query = require_non_empty("query", &params.query)?;

        let needle = query.clone();
        let matches = ctx.blocking(move |store| store.search_by_title(&needle)).await?;
        to_json(&json!({
            "query": query,
            "total_matches": matches.len(),
            "matches": matches,
        }))
    }
}
