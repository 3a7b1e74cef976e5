//! Per-topic paper collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PaperRecord;

/// Bookkeeping written next to a collection file.
///
/// Not required for reads; unknown keys are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Time of the last successful save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Topic label passed to the last save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Number of papers at the last save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_count: Option<usize>,

    /// Free-form extra keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// All stored papers for one topic, keyed by identifier.
///
/// Iteration is ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicCollection {
    papers: BTreeMap<String, PaperRecord>,
    /// Bookkeeping from the last save.
    pub metadata: CollectionMetadata,
}

impl TopicCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of papers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// True when the collection holds no papers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Check whether a paper is stored.
    #[must_use]
    pub fn contains(&self, paper_id: &str) -> bool {
        self.papers.contains_key(paper_id)
    }

    /// Look up a paper by identifier.
    #[must_use]
    pub fn get(&self, paper_id: &str) -> Option<&PaperRecord> {
        self.papers.get(paper_id)
    }

    /// Insert a paper unless one with the same identifier exists.
    ///
    /// Returns true when the paper was added. An existing record is never
    /// replaced or merged.
    pub fn insert_if_absent(&mut self, record: PaperRecord) -> bool {
        match self.papers.entry(record.paper_id().to_string()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// Iterate over stored papers.
    pub fn papers(&self) -> impl Iterator<Item = &PaperRecord> {
        self.papers.values()
    }

    /// Identifier-to-record view of the document written to disk.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = Map::with_capacity(self.papers.len());
        for (id, record) in &self.papers {
            doc.insert(id.clone(), serde_json::to_value(record)?);
        }
        Ok(Value::Object(doc))
    }

    /// Build a collection from a parsed collection document.
    ///
    /// Accepts a flat `{id: record}` object, or the `{"papers": {...},
    /// "metadata": {...}}` wrapper. Returns `None` when the document is not
    /// an object. Records that fail validation are skipped with a warning;
    /// the object key is the authoritative identifier.
    #[must_use]
    pub fn from_document(doc: Value) -> Option<Self> {
        let Value::Object(mut map) = doc else {
            return None;
        };

        let mut metadata = CollectionMetadata::default();
        if is_wrapped(&map) {
            if let Some(meta) = map.remove("metadata") {
                metadata = serde_json::from_value(meta).unwrap_or_default();
            }
            match map.remove("papers") {
                Some(Value::Object(inner)) => map = inner,
                _ => return None,
            }
        }

        let mut papers = BTreeMap::new();
        for (key, mut raw) in map {
            if let Value::Object(fields) = &mut raw {
                fields.insert("paper_id".to_string(), Value::String(key.clone()));
            }
            match serde_json::from_value::<PaperRecord>(raw) {
                Ok(record) => {
                    papers.insert(record.paper_id().to_string(), record);
                }
                Err(e) => {
                    tracing::warn!(paper_id = %key, error = %e, "Skipping malformed stored paper");
                }
            }
        }

        Some(Self { papers, metadata })
    }

    /// Build a collection from records, keeping the first of any duplicate ids.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = PaperRecord>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.insert_if_absent(record);
        }
        collection
    }
}

fn is_wrapped(map: &Map<String, Value>) -> bool {
    let papers_is_mapping = map
        .get("papers")
        .and_then(Value::as_object)
        .is_some_and(|inner| !inner.contains_key("title"));
    papers_is_mapping && map.keys().all(|k| k == "papers" || k == "metadata")
}
