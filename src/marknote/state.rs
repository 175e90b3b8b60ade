//! # Application State
//!
//! [`AppState`] is the single state container for a session. It is built once
//! by the owner (see [`crate::api::NotesApi`]) and handed by reference to every
//! command; nothing here is global.
//!
//! ## Selection Is An Id
//!
//! The current note is held as an id and resolved against `notes` on every
//! read. There is never a second copy of the selected note that could drift
//! from the entry in the collection.
//!
//! ## Edit Buffers
//!
//! [`EditBuffers`] are the working copies of the selected note's title,
//! content and tags (the latter comma-joined). They are reset whenever the
//! selection changes and only fold back into the note through a save.

use crate::model::Note;
use crate::repository::PersistedState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffers {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl EditBuffers {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags_line(),
        }
    }

    /// Whether title or content differ from the committed note. Tags are not
    /// part of the check.
    pub fn diverges_from(&self, note: &Note) -> bool {
        self.title != note.title || self.content != note.content
    }
}

/// A single edit applied to one of the buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferEdit {
    Title(String),
    Content(String),
    Tags(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Newest-created first. Saves replace in place and never reorder.
    pub notes: Vec<Note>,
    current_id: Option<String>,
    pub search_term: String,
    pub is_editing: bool,
    pub show_preview: bool,
    pub is_dark_mode: bool,
    pub buffers: EditBuffers,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            current_id: None,
            search_term: String::new(),
            is_editing: false,
            show_preview: true,
            is_dark_mode: false,
            buffers: EditBuffers::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self {
            notes: persisted.notes,
            is_dark_mode: persisted.is_dark_mode,
            ..Self::default()
        }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// The selected note, resolved against the collection.
    pub fn current_note(&self) -> Option<&Note> {
        self.current_id.as_deref().and_then(|id| self.find(id))
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    /// Select a note by id and reset the buffers from it.
    pub(crate) fn select_and_load(&mut self, id: &str) -> bool {
        let Some(note) = self.find(id) else {
            return false;
        };
        self.buffers = EditBuffers::from_note(note);
        self.current_id = Some(id.to_string());
        true
    }

    pub(crate) fn clear_selection(&mut self) {
        self.current_id = None;
        self.is_editing = false;
        self.buffers = EditBuffers::default();
    }

    /// Apply one buffer edit.
    pub fn apply_edit(&mut self, edit: BufferEdit) {
        match edit {
            BufferEdit::Title(title) => self.buffers.title = title,
            BufferEdit::Content(content) => self.buffers.content = content,
            BufferEdit::Tags(tags) => self.buffers.tags = tags,
        }
    }

    /// True while editing a selected note whose buffers differ from it.
    pub fn has_pending_changes(&self) -> bool {
        self.is_editing
            && self
                .current_note()
                .is_some_and(|note| self.buffers.diverges_from(note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(notes: Vec<Note>) -> AppState {
        AppState {
            notes,
            ..AppState::default()
        }
    }

    #[test]
    fn defaults() {
        let state = AppState::new();
        assert!(state.notes.is_empty());
        assert!(state.current_note().is_none());
        assert!(state.show_preview);
        assert!(!state.is_dark_mode);
        assert!(!state.is_editing);
    }

    #[test]
    fn selection_resolves_against_collection() {
        let note = Note::new("A", "a");
        let id = note.id.clone();
        let mut state = state_with(vec![note]);
        assert!(state.select_and_load(&id));

        state.notes[0].title = "Renamed".to_string();
        assert_eq!(state.current_note().unwrap().title, "Renamed");
    }

    #[test]
    fn select_unknown_id_leaves_state() {
        let mut state = state_with(vec![Note::new("A", "a")]);
        assert!(!state.select_and_load("missing"));
        assert!(state.current_id().is_none());
    }

    #[test]
    fn buffers_load_tags_joined() {
        let mut note = Note::new("A", "a");
        note.tags = vec!["x".to_string(), "y".to_string()];
        let buffers = EditBuffers::from_note(&note);
        assert_eq!(buffers.tags, "x, y");
    }

    #[test]
    fn tag_only_edit_is_not_divergence() {
        let note = Note::new("A", "a");
        let id = note.id.clone();
        let mut state = state_with(vec![note]);
        state.select_and_load(&id);
        state.is_editing = true;

        state.apply_edit(BufferEdit::Tags("new".to_string()));
        assert!(!state.has_pending_changes());

        state.apply_edit(BufferEdit::Content("changed".to_string()));
        assert!(state.has_pending_changes());
    }

    #[test]
    fn divergence_requires_editing() {
        let note = Note::new("A", "a");
        let id = note.id.clone();
        let mut state = state_with(vec![note]);
        state.select_and_load(&id);
        state.apply_edit(BufferEdit::Title("B".to_string()));
        assert!(!state.has_pending_changes());
    }

    #[test]
    fn from_persisted_keeps_theme() {
        let state = AppState::from_persisted(PersistedState {
            notes: vec![Note::new("A", "")],
            is_dark_mode: true,
        });
        assert!(state.is_dark_mode);
        assert_eq!(state.notes.len(), 1);
        assert!(state.show_preview);
    }
}
