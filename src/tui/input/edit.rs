use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::tui::editor::EditField;

/// What a key did to a single-line input field.
enum EditAction {
    None,
    Submit,
    Cancel,
}

/// Shared key handling for the three single-line surfaces (capture,
/// inline edit, note). The completion session gets first refusal on
/// every key; only what it passes through reaches normal editing.
fn field_key(field: &mut EditField, vocabulary: &[String], key: &KeyEvent) -> EditAction {
    if field.handle_session_key(key, vocabulary) {
        return EditAction::None;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => return EditAction::Submit,
        (_, KeyCode::Esc) => return EditAction::Cancel,

        // Readline-style line editing.
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            field.move_home(vocabulary);
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            field.move_end(vocabulary);
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            field.kill_to_start(vocabulary);
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            field.delete_word_back(vocabulary);
        }

        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            field.delete_word_back(vocabulary);
        }
        (_, KeyCode::Backspace) => field.backspace(vocabulary),

        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => field.move_word_left(vocabulary),
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => field.move_word_right(vocabulary),
        (_, KeyCode::Left) => field.move_left(vocabulary),
        (_, KeyCode::Right) => field.move_right(vocabulary),
        (_, KeyCode::Home) => field.move_home(vocabulary),
        (_, KeyCode::End) => field.move_end(vocabulary),

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            field.insert_char(c, vocabulary);
        }
        _ => {}
    }
    EditAction::None
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let action = match app.mode {
        Mode::Capture => app
            .capture
            .as_mut()
            .map(|f| field_key(f, &app.vocabulary, &key)),
        Mode::Edit => app
            .edit
            .as_mut()
            .map(|(_, f)| field_key(f, &app.vocabulary, &key)),
        Mode::Note => app
            .note
            .as_mut()
            .map(|(_, f)| field_key(f, &app.vocabulary, &key)),
        _ => None,
    };

    match action {
        Some(EditAction::Submit) => submit(app),
        Some(EditAction::Cancel) => cancel(app),
        _ => {}
    }
}

fn submit(app: &mut App) {
    match app.mode {
        Mode::Capture => {
            // Quick capture stays open for rapid entry; Esc closes it.
            let text = app.capture.as_ref().map(|f| f.buffer.clone());
            if let Some(text) = text
                && app.board.add_item(&text).is_some()
            {
                app.persist();
            }
            let mut field = EditField::new(app.session_config());
            field.refresh(&app.vocabulary);
            app.capture = Some(field);
        }
        Mode::Edit => {
            if let Some((id, field)) = app.edit.take() {
                if app.board.set_text(id, &field.buffer) {
                    app.persist();
                }
                app.mode = Mode::Navigate;
            }
        }
        Mode::Note => {
            if let Some((id, field)) = app.note.take() {
                if app.board.add_note(id, &field.buffer) {
                    app.expanded.insert(id);
                    app.persist();
                }
                app.mode = Mode::Navigate;
            }
        }
        _ => {}
    }
}

fn cancel(app: &mut App) {
    app.capture = None;
    app.edit = None;
    app.note = None;
    app.mode = Mode::Navigate;
}
