use crate::error::{NoteError, Result};
use crate::state::AppState;
use std::fmt;
use std::str::FromStr;

/// A user input that picks a note: its 1-based position in the list, or an id
/// (a unique prefix is enough).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(usize),
    Id(String),
}

impl FromStr for NoteSelector {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NoteError::Api("Empty note reference".to_string()));
        }
        if let Ok(n) = s.parse::<usize>() {
            return Ok(NoteSelector::Index(n));
        }
        Ok(NoteSelector::Id(s.to_string()))
    }
}

impl fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSelector::Index(i) => write!(f, "{}", i),
            NoteSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Resolve a selector to a note id in the current collection.
///
/// An all-digit reference past the end of the list is retried as an id
/// prefix, so ids that start with digits stay reachable.
pub fn resolve(state: &AppState, selector: &NoteSelector) -> Result<String> {
    match selector {
        NoteSelector::Index(n) => {
            if let Some(note) = n.checked_sub(1).and_then(|i| state.notes.get(i)) {
                return Ok(note.id.clone());
            }
            resolve_id(state, &n.to_string())
                .map_err(|_| NoteError::Api(format!("Index {} not found", n)))
        }
        NoteSelector::Id(prefix) => resolve_id(state, prefix),
    }
}

fn resolve_id(state: &AppState, prefix: &str) -> Result<String> {
    if let Some(note) = state.find(prefix) {
        return Ok(note.id.clone());
    }
    let matches: Vec<&str> = state
        .notes
        .iter()
        .filter(|n| n.id.starts_with(prefix))
        .map(|n| n.id.as_str())
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(NoteError::NoteNotFound(prefix.to_string())),
        _ => Err(NoteError::Api(format!(
            "Id prefix {} matches {} notes",
            prefix,
            matches.len()
        ))),
    }
}
