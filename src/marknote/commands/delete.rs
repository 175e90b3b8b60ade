use crate::commands::{CmdMessage, CmdResult};
use crate::state::AppState;

/// Remove a note. Clears the selection if it was the selected one.
///
/// An unknown id removes nothing and reports nothing, so the caller can skip
/// the persistence write.
pub fn run(state: &mut AppState, id: &str) -> CmdResult {
    let Some(pos) = state.position(id) else {
        tracing::debug!(id, "delete ignored unknown note");
        return CmdResult::default();
    };

    let removed = state.notes.remove(pos);
    if state.current_id() == Some(id) {
        state.clear_selection();
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note deleted: {}",
        removed.title
    )));
    result.with_affected_notes(vec![removed])
}
