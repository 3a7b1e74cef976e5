//! Author value object.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A paper author.
///
/// Authors are immutable; the only attribute is the display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AuthorEntry")]
pub struct Author {
    name: String,
}

impl Author {
    /// Create an author from a display name.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the trimmed name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("author", "name cannot be empty"));
        }
        Ok(Self { name: trimmed.to_string() })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Author as found in stored documents.
///
/// Older files hold bare name strings, newer ones `{"name": ...}` objects.
/// The object shape is tried first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum AuthorEntry {
    Object { name: String },
    Name(String),
}

impl TryFrom<AuthorEntry> for Author {
    type Error = ValidationError;

    fn try_from(entry: AuthorEntry) -> Result<Self, Self::Error> {
        match entry {
            AuthorEntry::Object { name } | AuthorEntry::Name(name) => Self::new(name),
        }
    }
}

impl From<&Author> for AuthorEntry {
    fn from(author: &Author) -> Self {
        Self::Name(author.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_trims_name() {
        let author = Author::new("  Ada Lovelace ").unwrap();
        assert_eq!(author.name(), "Ada Lovelace");
    }

    #[test]
    fn test_author_rejects_blank() {
        assert!(Author::new("   ").is_err());
    }

    #[test]
    fn test_author_accepts_both_shapes() {
        let from_obj: Author = serde_json::from_str(r#"{"name": "Alan Turing"}"#).unwrap();
        let from_str: Author = serde_json::from_str(r#""Alan Turing""#).unwrap();
        assert_eq!(from_obj, from_str);
    }
}
