//! Topic label to directory name mapping.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character or hyphen is dropped.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}_-]").expect("valid regex"));

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("valid regex"));

/// Map a free-text topic to a filesystem-safe directory name.
///
/// Lowercases, turns spaces into underscores, strips path-hostile
/// characters (`< > : " / \ | ? *` and any other punctuation), collapses
/// underscore runs and trims underscores from both ends. Distinct topics
/// may map to the same name; they then share one collection.
#[must_use]
pub fn directory_name(topic: &str) -> String {
    let lowered = topic.to_lowercase().replace(' ', "_");
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let collapsed = UNDERSCORE_RUNS.replace_all(&stripped, "_");
    collapsed.trim_matches('_').to_string()
}

/// Best-effort human label for a directory name ("deep_learning" -> "Deep Learning").
///
/// Not an inverse of [`directory_name`].
#[must_use]
pub fn display_label(dir_name: &str) -> String {
    dir_name
        .split('_')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
