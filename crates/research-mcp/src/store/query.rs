//! Read-only views over the store: statistics, title search, listings.

use std::cmp::Reverse;
use std::path::Path;

use chrono::Utc;

use super::{PaperStore, display_label};
use crate::models::{
    DatabaseStats, PaperSummary, TitleMatch, TopicCollection, TopicListing, TopicStats,
};

/// Number of leading title words that earn the position boost.
const LEADING_WORDS: usize = 3;

impl PaperStore {
    /// Counts and date range for one topic.
    ///
    /// An empty or missing topic reports zero papers and no dates.
    #[must_use]
    pub fn topic_stats(&self, topic: &str) -> TopicStats {
        summarize(topic, &self.load(topic))
    }

    /// Statistics across every topic, largest topics first.
    ///
    /// Never fails: if the store root cannot be scanned the result is zeroed
    /// and carries the error message.
    #[must_use]
    pub fn database_stats(&self) -> DatabaseStats {
        let dirs = match self.scan_topic_dirs() {
            Ok(dirs) => dirs,
            Err(e) => {
                tracing::error!(root = %self.root.display(), error = %e, "Failed to compute database stats");
                return DatabaseStats::degraded(format!("failed to scan {}: {e}", self.root.display()));
            }
        };

        let mut topics: Vec<TopicStats> = dirs
            .iter()
            .map(|dir| summarize(&dir_label(dir), &self.read_collection(dir)))
            .collect();
        topics.sort_by(|a, b| b.paper_count.cmp(&a.paper_count).then_with(|| a.topic.cmp(&b.topic)));

        DatabaseStats {
            total_topics: topics.len(),
            total_papers: topics.iter().map(|t| t.paper_count).sum(),
            topics,
            generated_at: Utc::now(),
            error: None,
        }
    }

    /// Case-insensitive title substring search across all topics.
    ///
    /// Hits whose query occurs within the first three title words come first,
    /// then hits matching more individual query words, then newer papers.
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> Vec<TitleMatch> {
        let lowered = query.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }
        let needle = words.join(" ");

        let mut ranked = Vec::new();
        for dir in self.topic_dirs() {
            let topic = dir_label(&dir);
            for record in self.read_collection(&dir).papers() {
                let lowered_title = record.title().to_lowercase();
                let title_words: Vec<&str> = lowered_title.split_whitespace().collect();
                let title = title_words.join(" ");
                if !title.contains(&needle) {
                    continue;
                }

                let leading = title_words[..title_words.len().min(LEADING_WORDS)].join(" ");
                let rank = (
                    leading.contains(&needle),
                    words.iter().filter(|w| title.contains(**w)).count(),
                    record.published(),
                );

                ranked.push((
                    rank,
                    TitleMatch {
                        id: record.paper_id().to_string(),
                        title: record.title().to_string(),
                        authors: record.author_names().into_iter().map(String::from).collect(),
                        published: record.published(),
                        topic: topic.clone(),
                        category: record.category().map(String::from),
                    },
                ));
            }
        }

        ranked.sort_by(|(a_rank, a), (b_rank, b)| {
            b_rank.cmp(a_rank).then_with(|| a.id.cmp(&b.id))
        });
        tracing::debug!(query, hits = ranked.len(), "Title search finished");
        ranked.into_iter().map(|(_, hit)| hit).collect()
    }

    /// Every paper stored under a topic, newest first.
    #[must_use]
    pub fn list_by_topic(&self, topic: &str) -> TopicListing {
        let collection = self.load(topic);

        let mut papers: Vec<PaperSummary> = collection.papers().map(PaperSummary::from).collect();
        papers.sort_by_key(|p| (Reverse(p.published), p.id.clone()));

        TopicListing {
            topic: topic.to_string(),
            paper_count: papers.len(),
            papers,
            metadata: collection.metadata,
        }
    }
}

fn summarize(topic: &str, collection: &TopicCollection) -> TopicStats {
    let dates = || collection.papers().map(|p| p.published());
    TopicStats {
        topic: topic.to_string(),
        paper_count: collection.len(),
        latest_paper: dates().max(),
        oldest_paper: dates().min(),
        last_updated: if collection.is_empty() {
            None
        } else {
            collection.metadata.last_updated
        },
    }
}

fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(display_label)
        .unwrap_or_default()
}
