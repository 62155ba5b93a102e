//! Dropdown menu commands
use folio_core::InputEvent;

use super::CommandResult;
use crate::state::AppState;

/// Route a key or pointer event; returns the dropdowns left open
pub fn handle_input(state: &AppState, event: InputEvent) -> CommandResult<Vec<String>> {
    match state.with_viewer_mut(|viewer| {
        viewer.handle_input(&event);
        Ok(viewer.menus().open_menus().map(str::to_string).collect())
    }) {
        Ok(open) => CommandResult::ok(open),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
