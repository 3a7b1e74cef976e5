//! Export tool: export_paper.

use serde_json::json;

use super::{McpTool, ToolContext, parse_input};
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{ExportFormat, ExportPaperInput, require_non_empty};

/// Render a stored paper as JSON, BibTeX or plain text.
pub struct ExportPaperTool;

#[async_trait::async_trait]
impl McpTool for ExportPaperTool {
    fn name(&self) -> &'static str {
        "export_paper"
    }

    fn description(&self) -> &'static str {
        "Export a stored paper as structured JSON, a BibTeX citation, or plain text."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paper_id": {
                    "type": "string",
                    "description": "arXiv identifier of a stored paper"
                },
                "format": {
                    "type": "string",
                    "enum": ExportFormat::ALL.map(ExportFormat::as_str),
                    "default": "json"
                }
            },
            "required": ["paper_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ExportPaperInput = parse_input(input)?;
        let paper_id = require_non_empty("paper_id", &params.paper_id)?;

        let lookup_id = paper_id.clone();
        let (record, topics) = ctx
            .blocking(move |store| match store.find_by_id(&lookup_id) {
                Some(record) => (Some(record), Vec::new()),
                None => (None, store.list_topics()),
            })
            .await?;
        let record = record.ok_or_else(|| ToolError::not_found(format!("paper {paper_id}"), topics))?;

        formatters::export(&record, &params.format).ok_or_else(|| {
            ToolError::validation(
                "format",
                format!("unsupported format {:?}, expected json, bibtex or plain", params.format),
            )
        })
    }
}
