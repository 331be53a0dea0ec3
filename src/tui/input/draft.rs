use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, View};

/// The draft pad is modeless: keys edit the buffer directly. The
/// completion session still gets first refusal, so Esc closes the
/// dropdown before it can leave the view, and Tab completes instead of
/// indenting.
pub(super) fn handle_draft(app: &mut App, key: KeyEvent) {
    if app.draft.handle_session_key(&key, &app.vocabulary) {
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            // Leave the pad, persisting the scratch text.
            if app.board.draft != app.draft.buffer {
                app.board.draft = app.draft.buffer.clone();
                app.persist();
            }
            app.view = View::Queue;
        }
        (_, KeyCode::Enter) => app.draft.insert_newline(&app.vocabulary),

        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            app.draft.move_home(&app.vocabulary);
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.draft.move_end(&app.vocabulary);
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            app.draft.delete_word_back(&app.vocabulary);
        }

        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            app.draft.delete_word_back(&app.vocabulary);
        }
        (_, KeyCode::Backspace) => app.draft.backspace(&app.vocabulary),

        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
            app.draft.move_word_left(&app.vocabulary);
        }
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
            app.draft.move_word_right(&app.vocabulary);
        }
        (_, KeyCode::Left) => app.draft.move_left(&app.vocabulary),
        (_, KeyCode::Right) => app.draft.move_right(&app.vocabulary),
        // Up/Down arrive here only while the dropdown is closed.
        (_, KeyCode::Up) => app.draft.move_up(&app.vocabulary),
        (_, KeyCode::Down) => app.draft.move_down(&app.vocabulary),
        (_, KeyCode::Home) => app.draft.move_home(&app.vocabulary),
        (_, KeyCode::End) => app.draft.move_end(&app.vocabulary),

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.draft.insert_char(c, &app.vocabulary);
        }
        _ => {}
    }
}
