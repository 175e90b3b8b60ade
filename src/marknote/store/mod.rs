//! # Storage Layer
//!
//! Marknote persists through a plain string key-value store: one key holds the
//! whole serialized record (see [`crate::repository`]). The [`KeyValueStore`]
//! trait keeps the rest of the application ignorant of where that string lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store. Each key is a file `{key}.json` inside
//!   the data directory, written atomically (tmp file + rename).
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O. Can
//!   simulate write failures to exercise the error paths.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json          # Configuration (see config.rs)
//! └── markdown-notes.json  # The persisted record
//! ```

use crate::error::{NoteError, Result};

pub mod fs;
pub mod memory;

/// Abstract interface over a string key-value store.
///
/// Writes overwrite the whole value; there are no partial writes.
pub trait KeyValueStore {
    /// Read the value for a key. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value for a key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys become file names, so they are restricted to a safe alphabet.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(NoteError::Store(format!("Invalid storage key: {:?}", key)))
    }
}
