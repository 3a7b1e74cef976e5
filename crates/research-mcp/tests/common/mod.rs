//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tempfile::TempDir;

use research_mcp::client::PaperSource;
use research_mcp::error::ClientResult;
use research_mcp::models::Author;
use research_mcp::tools::ToolContext;
use research_mcp::{Config, PaperRecord, PaperStore};

/// A store rooted in a fresh temporary directory.
pub fn temp_store() -> (TempDir, Config, PaperStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_testing(dir.path(), "http://127.0.0.1:9");
    let store = PaperStore::new(&config);
    (dir, config, store)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A valid record with an arXiv-style PDF link.
pub fn record(id: &str, title: &str, published: NaiveDate) -> PaperRecord {
    PaperRecord::new(
        id,
        title,
        format!("Abstract of {title}."),
        &format!("http://arxiv.org/pdf/{id}"),
        published,
    )
    .unwrap()
    .with_authors([Author::new("Test Author").unwrap()])
}

/// Search adapter returning canned records and counting calls.
#[derive(Debug, Default)]
pub struct MockSource {
    pub records: Vec<PaperRecord>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl MockSource {
    pub fn new(records: Vec<PaperRecord>) -> Self {
        Self { records, calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PaperSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, topic: &str, max_results: u32) -> ClientResult<Vec<PaperRecord>> {
        self.calls.lock().unwrap().push((topic.to_string(), max_results));
        Ok(self.records.iter().take(max_results as usize).cloned().collect())
    }
}

/// Tool context over a temporary store and a mock source.
pub fn tool_context(records: Vec<PaperRecord>) -> (TempDir, ToolContext, Arc<MockSource>) {
    let (dir, config, store) = temp_store();
    let source = Arc::new(MockSource::new(records));
    let ctx = ToolContext::new(Arc::new(config), Arc::new(store), Arc::clone(&source) as Arc<dyn PaperSource>);
    (dir, ctx, source)
}

/// Atom feed with one entry per `(id, title, published)`.
pub fn atom_feed(entries: &[(&str, &str, &str)]) -> String {
    let mut feed = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query</title>
  <id>http://arxiv.org/api/test</id>
"#,
    );
    for (id, title, published) in entries {
        feed.push_str(&format!(
            r#"  <entry>
    <id>http://arxiv.org/abs/{id}</id>
    <updated>{published}</updated>
    <published>{published}</published>
    <title>{title}</title>
    <summary>Summary of {title}.</summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/{id}" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
"#
        ));
    }
    feed.push_str("</feed>\n");
    feed
}
