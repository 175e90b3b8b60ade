use crate::commands::{CmdMessage, CmdResult};
use crate::model::{normalize_title, parse_tags};
use crate::state::AppState;
use chrono::Utc;

/// Commit the edit buffers into the selected note.
///
/// Title is trimmed (placeholder when blank), content is taken verbatim and
/// the tag line is split on commas. Id and creation time are preserved; the
/// note is replaced in place so list order does not change.
pub fn run(state: &mut AppState) -> CmdResult {
    let Some(id) = state.current_id().map(str::to_string) else {
        return CmdResult::default();
    };
    let Some(pos) = state.position(&id) else {
        return CmdResult::default();
    };

    let mut note = state.notes[pos].clone();
    note.title = normalize_title(&state.buffers.title);
    note.content = state.buffers.content.clone();
    note.tags = parse_tags(&state.buffers.tags);
    // Clock skew must not produce updatedAt < createdAt
    note.updated_at = Utc::now().max(note.created_at);

    state.notes[pos] = note.clone();
    state.is_editing = false;

    let mut result = CmdResult::default().with_affected_notes(vec![note]);
    result.add_message(CmdMessage::success("Note saved"));
    result
}
