//! On-disk paper store.
//!
//! One directory per topic under the store root, each holding a JSON
//! collection file keyed by paper identifier and a small metadata file:
//!
//! ```text
//! <papers_dir>/
//!   quantum_computing/
//!     papers_info.json   {"2301.00001v1": {...}, ...}
//!     papers_meta.json   {"last_updated": ..., "topic": ..., "paper_count": ...}
//! ```
//!
//! Reads never fail: a missing or unparseable collection loads as empty.
//! Writes overwrite the whole file. There is no locking; concurrent writers
//! to one topic race and the last save wins.

pub mod naming;
mod query;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, storage};
use crate::error::{StoreError, StoreResult, ValidationError};
use crate::models::{CollectionMetadata, PaperRecord, TopicCollection};

pub use naming::{directory_name, display_label};

/// Per-topic JSON paper store.
#[derive(Debug, Clone)]
pub struct PaperStore {
    root: PathBuf,
    collection_file: String,
    json_indent: usize,
}

impl PaperStore {
    /// Create a store from configuration. Does not touch the filesystem.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.papers_dir.clone(),
            collection_file: config.collection_file.clone(),
            json_indent: config.json_indent,
        }
    }

    /// Store root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a topic's files.
    #[must_use]
    pub fn topic_dir(&self, topic: &str) -> PathBuf {
        self.root.join(directory_name(topic))
    }

    /// Collection file for a topic.
    #[must_use]
    pub fn collection_path(&self, topic: &str) -> PathBuf {
        self.topic_dir(topic).join(&self.collection_file)
    }

    /// Load a topic's collection.
    ///
    /// Missing, unreadable or malformed files yield an empty collection.
    /// Malformed individual records are skipped.
    #[must_use]
    pub fn load(&self, topic: &str) -> TopicCollection {
        if directory_name(topic).is_empty() {
            tracing::debug!(topic, "Topic has no usable directory name, nothing to load");
            return TopicCollection::new();
        }
        let collection = self.read_collection(&self.topic_dir(topic));
        tracing::debug!(topic, papers = collection.len(), "Loaded collection");
        collection
    }

    /// Persist a topic's collection, overwriting any previous file.
    ///
    /// Updates `collection.metadata` (last write time, topic, paper count)
    /// and returns the collection file path.
    pub fn save(&self, topic: &str, collection: &mut TopicCollection) -> StoreResult<PathBuf> {
        let dir_name = directory_name(topic);
        if dir_name.is_empty() {
            return Err(ValidationError::new(
                "topic",
                format!("{topic:?} has no characters usable in a directory name"),
            )
            .into());
        }

        let dir = self.root.join(&dir_name);
        fs::create_dir_all(&dir).map_err(|e| StoreError::storage(&dir, e))?;

        collection.metadata.last_updated = Some(Utc::now());
        collection.metadata.topic = Some(topic.to_string());
        collection.metadata.paper_count = Some(collection.len());

        let path = dir.join(&self.collection_file);
        self.write_json(&path, &collection.to_document()?)?;
        self.write_json(&dir.join(storage::METADATA_FILE), &collection.metadata)?;

        tracing::info!(topic, papers = collection.len(), path = %path.display(), "Saved collection");
        Ok(path)
    }

    /// Merge search candidates into a topic and save once.
    ///
    /// A candidate is added only if its identifier is not already stored;
    /// stored records are never overwritten. Returns the saved collection and
    /// the number of papers added.
    pub fn upsert_from_search(
        &self,
        topic: &str,
        candidates: impl IntoIterator<Item = PaperRecord>,
    ) -> StoreResult<(TopicCollection, usize)> {
        let mut collection = self.load(topic);
        let mut added = 0;

        for candidate in candidates {
            let paper_id = candidate.paper_id().to_string();
            if collection.insert_if_absent(candidate) {
                added += 1;
                tracing::debug!(topic, paper_id = %paper_id, "Added new paper");
            } else {
                tracing::debug!(topic, paper_id = %paper_id, "Paper already stored");
            }
        }

        self.save(topic, &mut collection)?;
        Ok((collection, added))
    }

    /// Find a paper by identifier across every topic.
    ///
    /// When several topics hold the identifier, the copy from the most
    /// recently saved collection wins; collections without a save time rank
    /// oldest, and ties keep directory-name order. Unreadable topics are
    /// logged and skipped.
    #[must_use]
    pub fn find_by_id(&self, paper_id: &str) -> Option<PaperRecord> {
        tracing::debug!(paper_id, "Searching all topics");

        let mut best: Option<(Option<DateTime<Utc>>, PaperRecord)> = None;
        for dir in self.topic_dirs() {
            let collection = self.read_collection(&dir);
            let Some(record) = collection.get(paper_id) else {
                continue;
            };
            let saved_at = collection.metadata.last_updated;
            tracing::debug!(paper_id, topic_dir = %dir.display(), ?saved_at, "Found paper");

            if best.as_ref().is_none_or(|(newest, _)| saved_at > *newest) {
                best = Some((saved_at, record.clone()));
            }
        }

        if best.is_none() {
            tracing::debug!(paper_id, "Paper not found in any topic");
        }
        best.map(|(_, record)| record)
    }

    /// Display labels of every stored topic, sorted.
    #[must_use]
    pub fn list_topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .topic_dirs()
            .iter()
            .filter_map(|dir| dir.file_name().and_then(|n| n.to_str()).map(display_label))
            .collect();
        topics.sort();
        topics
    }

    /// Remove topic directories that are empty or hold no papers.
    ///
    /// Returns the number of directories removed. Failures are logged and
    /// the scan continues.
    #[must_use]
    pub fn cleanup_empty_topics(&self) -> usize {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(root = %self.root.display(), error = %e, "Store root not readable");
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            match self.remove_if_empty(&dir) {
                Ok(true) => {
                    removed += 1;
                    tracing::info!(dir = %dir.display(), "Removed empty topic directory");
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to clean up topic directory");
                }
            }
        }
        removed
    }

    fn remove_if_empty(&self, dir: &Path) -> std::io::Result<bool> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name());
        }

        if names.is_empty() {
            fs::remove_dir(dir)?;
            return Ok(true);
        }

        let only_store_files = names.iter().all(|name| {
            name.to_str()
                .is_some_and(|n| n == self.collection_file || n == storage::METADATA_FILE)
        });
        if only_store_files && self.stored_entry_count(dir) == Some(0) {
            fs::remove_dir_all(dir)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Count the entries of a topic's collection file without any fallback.
    ///
    /// A missing file counts as zero. Returns `None` when the file cannot be
    /// read or is not a JSON object, so cleanup leaves it alone.
    fn stored_entry_count(&self, dir: &Path) -> Option<usize> {
        let path = dir.join(&self.collection_file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Some(0),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read collection, keeping topic");
                return None;
            }
        };

        let count = serde_json::from_str::<Value>(&raw)
            .ok()
            .as_ref()
            .and_then(Value::as_object)
            .map(|map| match map.get("papers").and_then(Value::as_object) {
                Some(papers) if map.keys().all(|k| k == "papers" || k == "metadata") => papers.len(),
                _ => map.len(),
            });
        if count.is_none() {
            tracing::warn!(path = %path.display(), "Collection is not a JSON object, keeping topic");
        }
        count
    }

    /// Topic directories that contain a collection file, sorted by name.
    fn topic_dirs(&self) -> Vec<PathBuf> {
        self.scan_topic_dirs().unwrap_or_else(|e| {
            tracing::debug!(root = %self.root.display(), error = %e, "Store root not readable");
            Vec::new()
        })
    }

    /// Like [`Self::topic_dirs`] but reports an unreadable root.
    ///
    /// A root that does not exist yet is an empty store, not an error.
    fn scan_topic_dirs(&self) -> std::io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable store entry");
                    None
                }
            })
            .filter(|path| path.is_dir() && path.join(&self.collection_file).is_file())
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    /// Read a topic directory, falling back to an empty collection.
    fn read_collection(&self, dir: &Path) -> TopicCollection {
        let path = dir.join(&self.collection_file);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return TopicCollection::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read collection, treating as empty");
                return TopicCollection::new();
            }
        };

        let parsed = serde_json::from_str(&raw)
            .ok()
            .and_then(TopicCollection::from_document);
        let Some(mut collection) = parsed else {
            tracing::warn!(path = %path.display(), "Collection file is not a JSON object, treating as empty");
            return TopicCollection::new();
        };

        if let Some(metadata) = read_metadata(&dir.join(storage::METADATA_FILE)) {
            collection.metadata = metadata;
        }
        collection
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> StoreResult<()> {
        let indent = " ".repeat(self.json_indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        buf.push(b'\n');

        let mut file = fs::File::create(path).map_err(|e| StoreError::storage(path, e))?;
        file.write_all(&buf).map_err(|e| StoreError::storage(path, e))?;
        file.sync_all().map_err(|e| StoreError::storage(path, e))?;
        Ok(())
    }
}

fn read_metadata(path: &Path) -> Option<CollectionMetadata> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed collection metadata");
            None
        }
    }
}
