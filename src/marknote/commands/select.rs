use crate::commands::CmdResult;
use crate::state::AppState;

/// Select a note, leave edit mode and load its committed fields into the
/// buffers. Unknown ids are ignored.
pub fn run(state: &mut AppState, id: &str) -> CmdResult {
    if !state.select_and_load(id) {
        tracing::debug!(id, "select ignored unknown note");
        return CmdResult::default();
    }
    state.is_editing = false;

    let listed = state.current_note().cloned().into_iter().collect();
    CmdResult::default().with_listed_notes(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::state::BufferEdit;

    #[test]
    fn select_exits_edit_mode_and_loads_buffers() {
        let mut state = AppState::new();
        let older = create::run(&mut state).affected_notes[0].id.clone();
        create::run(&mut state);
        state.notes[1].tags = vec!["a".into(), "b".into()];

        let result = run(&mut state, &older);

        assert_eq!(state.current_id(), Some(older.as_str()));
        assert!(!state.is_editing);
        assert_eq!(state.buffers.tags, "a, b");
        assert_eq!(result.listed_notes[0].id, older);
    }

    #[test]
    fn select_discards_unsaved_buffers() {
        let mut state = AppState::new();
        let id = create::run(&mut state).affected_notes[0].id.clone();
        state.apply_edit(BufferEdit::Title("Draft".into()));

        run(&mut state, &id);
        assert_eq!(state.buffers.title, state.current_note().unwrap().title);
    }

    #[test]
    fn unknown_id_is_a_silent_no_op() {
        let mut state = AppState::new();
        let id = create::run(&mut state).affected_notes[0].id.clone();

        let result = run(&mut state, "stale");
        assert!(result.messages.is_empty());
        assert_eq!(state.current_id(), Some(id.as_str()));
        assert!(state.is_editing);
    }
}
