mod draft;
mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode, View};

/// Handle a key event in the current view and mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay swallows everything; any key closes it.
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.view {
        View::Draft => draft::handle_draft(app, key),
        View::Queue => match app.mode {
            Mode::Navigate => navigate::handle_navigate(app, key),
            Mode::Search => search::handle_search(app, key),
            Mode::Capture | Mode::Edit | Mode::Note => edit::handle_edit(app, key),
        },
    }
}
