//! # Note Repository
//!
//! Mirrors the note collection and the theme flag into a [`KeyValueStore`]
//! under a single key. The record is written whole on every change:
//!
//! ```text
//! { "notes": [Note, ...], "isDarkMode": false }
//! ```
//!
//! There is no version field and no migration path. A record that fails to
//! deserialize is reported as an error; deciding what to do with it (log,
//! notify, start empty) is the caller's job.

use crate::error::{NoteError, Result};
use crate::model::Note;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Storage key used when the configuration does not name one.
pub const DEFAULT_STORAGE_KEY: &str = "markdown-notes";

/// The persisted unit: every note plus the theme flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub notes: Vec<Note>,
    #[serde(default)]
    pub is_dark_mode: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordRef<'a> {
    notes: &'a [Note],
    is_dark_mode: bool,
}

pub struct NoteRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NoteRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the record. `Ok(None)` when nothing was ever persisted.
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let state: PersistedState = serde_json::from_str(&raw).map_err(NoteError::Serialization)?;
        Ok(Some(state))
    }

    /// Overwrite the record with the given notes and theme flag.
    pub fn persist(&mut self, notes: &[Note], is_dark_mode: bool) -> Result<()> {
        let record = RecordRef {
            notes,
            is_dark_mode,
        };
        let content = serde_json::to_string(&record).map_err(NoteError::Serialization)?;
        self.store.set(&self.key, &content)?;
        tracing::debug!(key = %self.key, notes = notes.len(), "persisted notes");
        Ok(())
    }
}
