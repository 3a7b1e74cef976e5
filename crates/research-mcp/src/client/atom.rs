//! arXiv Atom feed parsing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ClientError, ClientResult, ValidationError};
use crate::models::{Author, PaperRecord, parse_iso_date};

/// Entry fields collected while walking the feed.
#[derive(Debug, Default)]
struct Entry {
    id_url: String,
    title: String,
    summary: String,
    published: String,
    updated: String,
    authors: Vec<String>,
    primary_category: Option<String>,
    first_category: Option<String>,
    pdf_url: Option<String>,
    doi: Option<String>,
}

impl Entry {
    fn into_record(self) -> Result<PaperRecord, ValidationError> {
        let paper_id = arxiv_id_from_url(&self.id_url)
            .ok_or_else(|| ValidationError::new("paper_id", format!("no /abs/ identifier in {:?}", self.id_url)))?;
        let published = parse_iso_date(&self.published)
            .ok_or_else(|| ValidationError::new("published", format!("{:?} is not a date", self.published)))?;
        let pdf_url = self.pdf_url.unwrap_or_else(|| format!("https://arxiv.org/pdf/{paper_id}"));

        Ok(PaperRecord::new(paper_id, self.title, self.summary, &pdf_url, published)?
            .with_authors(self.authors.into_iter().filter_map(|name| Author::new(name).ok()))
            .with_updated(parse_iso_date(&self.updated))
            .with_category(self.primary_category.or(self.first_category))
            .with_doi(self.doi))
    }

    /// Pick up attribute-carrying elements (`link`, `category`).
    fn absorb_attributes(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"link" => {
                let is_pdf = attr(e, b"title").as_deref() == Some("pdf")
                    || attr(e, b"type").as_deref() == Some("application/pdf");
                if is_pdf && self.pdf_url.is_none() {
                    self.pdf_url = attr(e, b"href");
                }
            }
            b"primary_category" => {
                self.primary_category = attr(e, b"term").filter(|t| !t.trim().is_empty());
            }
            b"category" if self.first_category.is_none() => {
                self.first_category = attr(e, b"term").filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }
}

/// Parse an Atom response into validated records, in feed order.
///
/// Entries that do not form a valid record (missing identifier, blank title,
/// unparseable date, ...) are logged and skipped.
///
/// # Errors
///
/// Returns [`ClientError::Feed`] if the document is not well-formed XML.
pub fn parse_feed(body: &str) -> ClientResult<Vec<PaperRecord>> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut entry: Option<Entry> = None;
    let mut in_author = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"entry" => entry = Some(Entry::default()),
                    b"author" => in_author = true,
                    _ => {}
                }
                if let Some(entry) = entry.as_mut() {
                    entry.absorb_attributes(&e);
                }
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = entry.as_mut() {
                    entry.absorb_attributes(&e);
                }
            }
            Ok(Event::Text(t)) => {
                let chunk = t.unescape().map_err(|e| ClientError::feed(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::CData(c)) => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Ok(Event::End(e)) => {
                let value = normalize_ws(&text);
                text.clear();

                let Some(current) = entry.as_mut() else {
                    continue;
                };
                match e.local_name().as_ref() {
                    b"id" => current.id_url = value,
                    b"title" => current.title = value,
                    b"summary" => current.summary = value,
                    b"published" => current.published = value,
                    b"updated" => current.updated = value,
                    b"doi" if !value.is_empty() => current.doi = Some(value),
                    b"name" if in_author && !value.is_empty() => current.authors.push(value),
                    b"author" => in_author = false,
                    b"entry" => {
                        if let Some(done) = entry.take() {
                            let id_url = done.id_url.clone();
                            match done.into_record() {
                                Ok(record) => records.push(record),
                                Err(err) => {
                                    tracing::warn!(entry = %id_url, error = %err, "Skipping invalid feed entry");
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Err(e) => {
                return Err(ClientError::feed(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    Ok(records)
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `http://arxiv.org/abs/2301.00001v1` -> `2301.00001v1`.
fn arxiv_id_from_url(url: &str) -> Option<String> {
    let i = url.rfind("/abs/")?;
    let id = url[i + "/abs/".len()..].trim_matches('/').trim();
    (!id.is_empty()).then(|| id.to_string())
}
