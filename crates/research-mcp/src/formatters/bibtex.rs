//! BibTeX citation export.

use std::fmt::Write;

use crate::models::PaperRecord;

/// Render an `@article` entry keyed by the paper identifier.
#[must_use]
pub fn format_bibtex(record: &PaperRecord) -> String {
    let id = record.paper_id();
    let mut output = String::new();

    let _ = writeln!(output, "@article{{{id},");
    let _ = writeln!(output, "  title={{{}}},", escape_bibtex(record.title()));
    let _ = writeln!(output, "  author={{{}}},", escape_bibtex(&record.joined_authors(" and ")));
    let _ = writeln!(output, "  year={{{}}},", record.year());
    let _ = writeln!(output, "  journal={{arXiv preprint arXiv:{id}}},");
    let _ = writeln!(output, "  url={{{}}}", record.pdf_url());
    output.push('}');

    output
}

/// Escape LaTeX special characters in a field value.
fn escape_bibtex(s: &str) -> String {
    s.replace('\\', "\\textbackslash{}")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('&', "\\&")
        .replace('%', "\\%")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('_', "\\_")
}
