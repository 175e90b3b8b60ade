//! # Domain Model
//!
//! A [`Note`] is a titled, tagged, timestamped unit of markdown text. Notes are
//! only ever mutated through a save, which rebuilds the committed fields from
//! the edit buffers (see [`crate::state::EditBuffers`]) using the normalization
//! helpers in this module:
//!
//! - [`normalize_title`]: trims the buffer title, falling back to [`UNTITLED`].
//! - [`parse_tags`]: splits the comma-joined tag buffer into trimmed, non-empty tags.
//! - [`join_tags`]: the inverse used when loading a note into the buffers.
//!
//! ## Serialized Shape
//!
//! Notes serialize with camelCase keys so the persisted record reads:
//!
//! ```text
//! { "id": "…", "title": "…", "content": "…", "tags": ["…"],
//!   "createdAt": "2024-05-01T10:00:00.123Z", "updatedAt": "…" }
//! ```
//!
//! Timestamps use RFC 3339 and parse back into [`DateTime<Utc>`] on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when the edit buffer title is blank at save time.
pub const UNTITLED: &str = "Untitled Note";

/// Title given to freshly created notes.
pub const NEW_NOTE_TITLE: &str = "New Note";

/// Content given to freshly created notes.
pub const NEW_NOTE_CONTENT: &str = "# New Note\n\nStart writing your markdown here...";

/// Separator used when joining tags into the edit buffer.
pub const TAG_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A fresh note carrying the default title and starter content.
    pub fn blank() -> Self {
        Self::new(NEW_NOTE_TITLE, NEW_NOTE_CONTENT)
    }

    /// Tags joined the way the tag edit buffer displays them.
    pub fn tags_line(&self) -> String {
        join_tags(&self.tags)
    }

    /// Case-insensitive match of an already-lowercased term against title,
    /// content and every tag.
    pub fn matches_lowercase(&self, term_lower: &str) -> bool {
        self.title.to_lowercase().contains(term_lower)
            || self.content.to_lowercase().contains(term_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term_lower))
    }
}

pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Splits a comma-joined tag line. Segments are trimmed and empty ones dropped;
/// duplicates are kept in order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_has_equal_timestamps_and_no_tags() {
        let note = Note::new("Title", "Body");
        assert_eq!(note.created_at, note.updated_at);
        assert!(note.tags.is_empty());
        assert!(Uuid::parse_str(&note.id).is_ok());
    }

    #[test]
    fn blank_note_uses_defaults() {
        let note = Note::blank();
        assert_eq!(note.title, NEW_NOTE_TITLE);
        assert_eq!(note.content, NEW_NOTE_CONTENT);
    }

    #[test]
    fn ids_are_unique() {
        let a = Note::blank();
        let b = Note::blank();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blank_title_becomes_placeholder() {
        assert_eq!(normalize_title(""), UNTITLED);
        assert_eq!(normalize_title("   \t "), UNTITLED);
    }

    #[test]
    fn title_is_trimmed_but_otherwise_verbatim() {
        assert_eq!(normalize_title("  My  Note "), "My  Note");
    }

    #[test]
    fn parse_tags_drops_empty_segments() {
        assert_eq!(parse_tags("work, ,ideas ,"), vec!["work", "ideas"]);
    }

    #[test]
    fn parse_tags_keeps_duplicates() {
        assert_eq!(parse_tags("a,a, b"), vec!["a", "a", "b"]);
    }

    #[test]
    fn parse_tags_empty_line() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn join_tags_uses_comma_space() {
        let tags = vec!["rust".to_string(), "notes".to_string()];
        assert_eq!(join_tags(&tags), "rust, notes");
        assert_eq!(parse_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn matches_title_content_or_tag() {
        let mut note = Note::new("Groceries", "Buy MILK");
        note.tags = vec!["Home".to_string()];
        assert!(note.matches_lowercase("groc"));
        assert!(note.matches_lowercase("milk"));
        assert!(note.matches_lowercase("home"));
        assert!(note.matches_lowercase(""));
        assert!(!note.matches_lowercase("work"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let note = Note::new("T", "C");
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let json = r#"{"id":"1","title":"T","content":"","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert!(note.tags.is_empty());
    }
}
