use crate::commands::{save, CmdResult};
use crate::state::AppState;

/// Leaving edit mode commits the buffers; entering it leaves them untouched.
pub fn toggle(state: &mut AppState) -> CmdResult {
    if state.is_editing {
        let result = save::run(state);
        state.is_editing = false;
        result
    } else {
        state.is_editing = true;
        CmdResult::default()
    }
}
