use crate::commands::{CmdMessage, CmdResult};
use crate::model::Note;
use crate::state::AppState;

/// Prepend a fresh note, select it and enter edit mode.
pub fn run(state: &mut AppState) -> CmdResult {
    insert(state, Note::blank(), "Note created")
}

/// Shared by create and import: prepend, select, edit.
pub(crate) fn insert(state: &mut AppState, note: Note, verb: &str) -> CmdResult {
    let id = note.id.clone();
    let title = note.title.clone();
    state.notes.insert(0, note.clone());
    state.select_and_load(&id);
    state.is_editing = true;

    let mut result = CmdResult::default().with_affected_notes(vec![note]);
    result.add_message(CmdMessage::success(format!("{}: {}", verb, title)));
    result
}
