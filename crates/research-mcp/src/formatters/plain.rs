//! Labeled plain-text export.

use crate::models::PaperRecord;

/// Render a human-readable block ending with the abstract.
#[must_use]
pub fn format_plain(record: &PaperRecord) -> String {
    format!(
        "Title: {title}\n\
         Authors: {authors}\n\
         Published: {published}\n\
         ArXiv ID: {id}\n\
         Category: {category}\n\
         PDF URL: {url}\n\
         \n\
         Abstract:\n\
         {summary}",
        title = record.title(),
        authors = record.joined_authors(", "),
        published = record.published(),
        id = record.paper_id(),
        category = record.category().unwrap_or("N/A"),
        url = record.pdf_url(),
        summary = record.summary(),
    )
}
