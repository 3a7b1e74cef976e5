//! Single-paper export renderers.

mod bibtex;
mod json;
mod plain;

pub use bibtex::format_bibtex;
pub use json::format_json;
pub use plain::format_plain;

use crate::models::{ExportFormat, PaperRecord};

/// Render a record in the named format.
///
/// Format names are matched case-insensitively. Returns `None` for an
/// unsupported format.
#[must_use]
pub fn export(record: &PaperRecord, format: &str) -> Option<String> {
    let Some(format) = ExportFormat::parse(format) else {
        tracing::warn!(format, paper_id = record.paper_id(), "Unsupported export format");
        return None;
    };
    render(record, format)
}

/// Render a record in an already-parsed format.
#[must_use]
pub fn render(record: &PaperRecord, format: ExportFormat) -> Option<String> {
    match format {
        ExportFormat::Json => format_json(record),
        ExportFormat::Bibtex => Some(format_bibtex(record)),
        ExportFormat::Plain => Some(format_plain(record)),
    }
}
