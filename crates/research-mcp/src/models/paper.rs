//! Paper record model and its on-disk JSON shape.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;

use super::author::{Author, AuthorEntry};
use crate::error::ValidationError;

/// Stored metadata for one paper.
///
/// Identifier, title and summary are trimmed and never empty; the PDF
/// reference is always a parseable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPaper", into = "StoredPaper")]
pub struct PaperRecord {
    paper_id: String,
    title: String,
    authors: Vec<Author>,
    summary: String,
    pdf_url: Url,
    published: NaiveDate,
    updated: Option<NaiveDate>,
    category: Option<String>,
    doi: Option<String>,
}

impl PaperRecord {
    /// Create a record from its required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the identifier, title or summary is
    /// blank, or the PDF reference is not a valid URL.
    pub fn new(
        paper_id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        pdf_url: &str,
        published: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let paper_id = non_empty("paper_id", paper_id.into())?;
        let title = non_empty("title", title.into())?;
        let summary = non_empty("summary", summary.into())?;
        let pdf_url = Url::parse(pdf_url.trim())
            .map_err(|e| ValidationError::new("pdf_url", format!("{pdf_url:?}: {e}")))?;

        Ok(Self {
            paper_id,
            title,
            authors: Vec::new(),
            summary,
            pdf_url,
            published,
            updated: None,
            category: None,
            doi: None,
        })
    }

    /// Set the author list.
    #[must_use]
    pub fn with_authors(mut self, authors: impl IntoIterator<Item = Author>) -> Self {
        self.authors = authors.into_iter().collect();
        self
    }

    /// Set the last-update date.
    #[must_use]
    pub fn with_updated(mut self, updated: Option<NaiveDate>) -> Self {
        self.updated = updated;
        self
    }

    /// Set the category label; blank labels are dropped.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = blank_to_none(category);
        self
    }

    /// Set the external identifier (DOI); blank values are dropped.
    #[must_use]
    pub fn with_doi(mut self, doi: Option<String>) -> Self {
        self.doi = blank_to_none(doi);
        self
    }

    /// Paper identifier.
    #[must_use]
    pub fn paper_id(&self) -> &str {
        &self.paper_id
    }

    /// Paper title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Authors in publication order.
    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Abstract.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// PDF location.
    #[must_use]
    pub const fn pdf_url(&self) -> &Url {
        &self.pdf_url
    }

    /// Publication date.
    #[must_use]
    pub const fn published(&self) -> NaiveDate {
        self.published
    }

    /// Last update date, if any.
    #[must_use]
    pub const fn updated(&self) -> Option<NaiveDate> {
        self.updated
    }

    /// Category label, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// DOI, if any.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }

    /// Publication year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.published.year()
    }

    /// Author names in order.
    #[must_use]
    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(Author::name).collect()
    }

    /// Author names joined with `sep`.
    #[must_use]
    pub fn joined_authors(&self, sep: &str) -> String {
        self.author_names().join(sep)
    }
}

fn non_empty(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// JSON shape of one record inside a collection file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPaper {
    #[serde(default)]
    paper_id: String,
    title: String,
    #[serde(default)]
    authors: Vec<AuthorEntry>,
    summary: String,
    pdf_url: String,
    #[serde(with = "iso_date")]
    published: NaiveDate,
    #[serde(default, with = "iso_date_opt", skip_serializing_if = "Option::is_none")]
    updated: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
}

impl TryFrom<StoredPaper> for PaperRecord {
    type Error = ValidationError;

    fn try_from(stored: StoredPaper) -> Result<Self, Self::Error> {
        // Blank author names are dropped rather than failing the record.
        let authors = stored
            .authors
            .into_iter()
            .filter_map(|entry| Author::try_from(entry).ok());

        Ok(Self::new(
            stored.paper_id,
            stored.title,
            stored.summary,
            &stored.pdf_url,
            stored.published,
        )?
        .with_authors(authors)
        .with_updated(stored.updated)
        .with_category(stored.category)
        .with_doi(stored.doi))
    }
}

impl From<PaperRecord> for StoredPaper {
    fn from(record: PaperRecord) -> Self {
        Self {
            authors: record.authors.iter().map(AuthorEntry::from).collect(),
            paper_id: record.paper_id,
            title: record.title,
            summary: record.summary,
            pdf_url: record.pdf_url.into(),
            published: record.published,
            updated: record.updated,
            category: record.category,
            doi: record.doi,
        }
    }
}

/// Parse `YYYY-MM-DD`, also accepting a full ISO datetime (date part wins).
pub(crate) fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_iso_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date {raw:?}")))
    }
}

mod iso_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::iso_date::serialize(date, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse_iso_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date {raw:?}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_trims_fields() {
        let record = PaperRecord::new(
            " 2301.00001v1 ",
            "  Attention Revisited ",
            " An abstract. ",
            "https://arxiv.org/pdf/2301.00001v1",
            date(2023, 1, 1),
        )
        .unwrap();

        assert_eq!(record.paper_id(), "2301.00001v1");
        assert_eq!(record.title(), "Attention Revisited");
        assert_eq!(record.summary(), "An abstract.");
        assert_eq!(record.year(), 2023);
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let url = "https://arxiv.org/pdf/x";
        let day = date(2023, 1, 1);

        let err = PaperRecord::new("", "t", "s", url, day).unwrap_err();
        assert_eq!(err.field, "paper_id");
        let err = PaperRecord::new("id", " ", "s", url, day).unwrap_err();
        assert_eq!(err.field, "title");
        let err = PaperRecord::new("id", "t", "\n", url, day).unwrap_err();
        assert_eq!(err.field, "summary");
        let err = PaperRecord::new("id", "t", "s", "not a url", day).unwrap_err();
        assert_eq!(err.field, "pdf_url");
    }

    #[test]
    fn test_deserialize_legacy_string_authors() {
        let record: PaperRecord = serde_json::from_value(json!({
            "paper_id": "1234.5678",
            "title": "Legacy",
            "authors": ["A. One", "B. Two"],
            "summary": "Old format.",
            "pdf_url": "http://arxiv.org/pdf/1234.5678",
            "published": "2020-05-01",
            "category": null,
            "updated": null,
            "doi": null
        }))
        .unwrap();

        assert_eq!(record.author_names(), vec!["A. One", "B. Two"]);
        assert_eq!(record.category(), None);
        assert_eq!(record.updated(), None);
    }

    #[test]
    fn test_deserialize_object_authors_and_datetime() {
        let record: PaperRecord = serde_json::from_value(json!({
            "paper_id": "1234.5678",
            "title": "Newer",
            "authors": [{"name": "A. One"}, "B. Two", {"name": "  "}],
            "summary": "New format.",
            "pdf_url": "http://arxiv.org/pdf/1234.5678",
            "published": "2021-02-03T10:00:00",
            "updated": "2021-03-04"
        }))
        .unwrap();

        assert_eq!(record.author_names(), vec!["A. One", "B. Two"]);
        assert_eq!(record.published(), date(2021, 2, 3));
        assert_eq!(record.updated(), Some(date(2021, 3, 4)));
    }

    #[test]
    fn test_serialize_authors_as_names() {
        let record = PaperRecord::new("id1", "T", "S", "https://example.org/a.pdf", date(2022, 7, 9))
            .unwrap()
            .with_authors([Author::new("X").unwrap()])
            .with_category(Some("cs.AI".to_string()));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["authors"], json!(["X"]));
        assert_eq!(value["published"], "2022-07-09");
        assert_eq!(value["category"], "cs.AI");
        assert!(value.get("doi").is_none());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_iso_date("2024-01-15T08:00:00Z"), Some(date(2024, 1, 15)));
        assert_eq!(parse_iso_date("January"), None);
    }
}
