//! Structured JSON export.

use crate::models::PaperRecord;

/// Pretty-print the full record, in the same shape it is stored in.
///
/// Returns `None` only if serialization fails, which is logged.
#[must_use]
pub fn format_json(record: &PaperRecord) -> Option<String> {
    match serde_json::to_string_pretty(record) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!(paper_id = record.paper_id(), error = %e, "Failed to serialize paper");
            None
        }
    }
}
