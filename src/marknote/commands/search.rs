use crate::commands::CmdResult;
use crate::model::Note;
use crate::state::AppState;

/// Notes whose title, content or any tag contains `term`, case-insensitively.
/// Order is preserved; an empty term matches everything.
pub fn filter<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    let term_lower = term.to_lowercase();
    notes
        .iter()
        .filter(|note| note.matches_lowercase(&term_lower))
        .collect()
}

/// List the notes visible under the state's current search term.
pub fn run(state: &AppState) -> CmdResult {
    let listed = filter(&state.notes, &state.search_term)
        .into_iter()
        .cloned()
        .collect();
    CmdResult::default().with_listed_notes(listed)
}
