use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

use super::navigate::jump_to_match;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            if app.search_input.is_empty() {
                app.last_search = None;
            } else {
                app.last_search = Some(app.search_input.clone());
            }
            app.mode = Mode::Navigate;
            jump_to_match(app, 1);
        }
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            app.search_input.pop();
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}
