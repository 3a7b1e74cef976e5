//! Input models for MCP tool parameters.
//!
//! Field names are snake_case; camelCase aliases are accepted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Input for `search_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPapersInput {
    /// Topic to search for (also the storage topic).
    pub topic: String,

    /// Maximum results to fetch; clamped to the configured limit.
    #[serde(default, alias = "maxResults")]
    pub max_results: Option<u32>,
}

/// Input for `extract_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractInfoInput {
    /// Paper identifier to look up.
    #[serde(alias = "paperId")]
    pub paper_id: String,
}

/// Input for `search_papers_by_title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSearchInput {
    /// Substring to look for in stored titles.
    pub query: String,
}

/// Input for `list_topic_papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTopicPapersInput {
    /// Topic label.
    pub topic: String,
}

/// Input for `export_paper`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPaperInput {
    /// Paper identifier to export.
    #[serde(alias = "paperId")]
    pub paper_id: String,

    /// Format name: json, bibtex or plain.
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "json".to_string()
}

/// Trim a required string parameter.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the trimmed value is empty.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}
