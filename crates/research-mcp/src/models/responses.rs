//! Response payloads returned by tools.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CollectionMetadata, PaperRecord};
use crate::error::{StoreError, ToolError, ValidationError};

/// Outcome of a search-and-store run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Topic searched.
    pub topic: String,
    /// Identifiers returned by the search adapter, in rank order.
    pub paper_ids: Vec<String>,
    /// Number of identifiers returned.
    pub total_found: usize,
    /// Number of papers that were not already stored.
    pub new_papers: usize,
    /// Collection file written.
    pub saved_to: PathBuf,
    /// When the search finished.
    pub timestamp: DateTime<Utc>,
}

/// Summary of one stored topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    /// Topic label.
    pub topic: String,
    /// Number of stored papers.
    pub paper_count: usize,
    /// Newest publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_paper: Option<NaiveDate>,
    /// Oldest publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_paper: Option<NaiveDate>,
    /// Last save time, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Aggregate statistics across all topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStats {
    /// Number of topics.
    pub total_topics: usize,
    /// Number of papers summed over topics.
    pub total_papers: usize,
    /// Per-topic statistics, most papers first.
    pub topics: Vec<TopicStats>,
    /// When these statistics were computed.
    pub generated_at: DateTime<Utc>,
    /// Set when the statistics are degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseStats {
    /// Zeroed statistics carrying an error message.
    #[must_use]
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            total_topics: 0,
            total_papers: 0,
            topics: Vec::new(),
            generated_at: Utc::now(),
            error: Some(error.into()),
        }
    }
}

/// One hit of a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMatch {
    /// Paper identifier.
    pub id: String,
    /// Paper title.
    pub title: String,
    /// Author names.
    pub authors: Vec<String>,
    /// Publication date.
    pub published: NaiveDate,
    /// Topic the paper is stored under.
    pub topic: String,
    /// Category label.
    pub category: Option<String>,
}

/// Compact paper entry used in topic listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
    /// Paper identifier.
    pub id: String,
    /// Paper title.
    pub title: String,
    /// Author names.
    pub authors: Vec<String>,
    /// Publication date.
    pub published: NaiveDate,
    /// Category label.
    pub category: Option<String>,
}

impl From<&PaperRecord> for PaperSummary {
    fn from(record: &PaperRecord) -> Self {
        Self {
            id: record.paper_id().to_string(),
            title: record.title().to_string(),
            authors: record.author_names().into_iter().map(String::from).collect(),
            published: record.published(),
            category: record.category().map(String::from),
        }
    }
}

/// All papers stored under one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicListing {
    /// Topic label.
    pub topic: String,
    /// Number of papers.
    pub paper_count: usize,
    /// Papers, newest first.
    pub papers: Vec<PaperSummary>,
    /// Collection bookkeeping.
    pub metadata: CollectionMetadata,
}

/// Structured error payload returned for expected failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error category (ValidationError, NotFoundError, ...).
    pub error_type: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Diagnostic context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ErrorResponse {
    /// Create an error payload.
    #[must_use]
    pub fn new(error: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: error_type.into(),
            timestamp: Utc::now(),
            context: None,
        }
    }

    /// Attach diagnostic context.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<&ToolError> for ErrorResponse {
    fn from(err: &ToolError) -> Self {
        let response = Self::new(err.to_user_message(), err.error_type());
        match err {
            ToolError::NotFound { searched_topics, .. } => {
                response.with_context(serde_json::json!({ "searched_topics": searched_topics }))
            }
            ToolError::Validation { field, .. }
            | ToolError::Store(StoreError::Validation(ValidationError { field, .. })) => {
                response.with_context(serde_json::json!({ "field": field }))
            }
            _ => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_topic_stats_omit_dates() {
        let stats = TopicStats {
            topic: "ai".to_string(),
            paper_count: 0,
            latest_paper: None,
            oldest_paper: None,
            last_updated: None,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value, serde_json::json!({"topic": "ai", "paper_count": 0}));
    }

    #[test]
    fn test_error_response_from_not_found() {
        let err = ToolError::not_found("paper 42", vec!["Ai".to_string(), "Physics".to_string()]);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.error_type, "NotFoundError");
        assert_eq!(
            response.context.unwrap()["searched_topics"],
            serde_json::json!(["Ai", "Physics"])
        );
    }

    #[test]
    fn test_degraded_stats() {
        let stats = DatabaseStats::degraded("disk on fire");
        assert_eq!(stats.total_topics, 0);
        assert_eq!(stats.error.as_deref(), Some("disk on fire"));
    }
}
