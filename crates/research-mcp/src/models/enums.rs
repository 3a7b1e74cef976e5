//! Enumeration types for tool parameters.

use serde::{Deserialize, Serialize};

/// Export format for a single stored paper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Full record as pretty-printed JSON.
    #[default]
    Json,
    /// BibTeX `@article` entry.
    Bibtex,
    /// Labeled plain text block.
    Plain,
}

impl ExportFormat {
    /// Every supported format, in display order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Bibtex, Self::Plain];

    /// Parse a user-supplied format name (case-insensitive).
    ///
    /// Returns `None` for unsupported names.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" | "structured" => Some(Self::Json),
            "bibtex" | "bib" | "citation" => Some(Self::Bibtex),
            "plain" | "text" | "txt" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Bibtex => "bibtex",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::parse("BibTeX"), Some(ExportFormat::Bibtex));
        assert_eq!(ExportFormat::parse(" JSON "), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("Plain"), Some(ExportFormat::Plain));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ExportFormat::parse("ris"), None);
        assert_eq!(ExportFormat::parse(""), None);
    }

    #[test]
    fn test_round_trip_names() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::parse(format.as_str()), Some(format));
        }
    }
}
