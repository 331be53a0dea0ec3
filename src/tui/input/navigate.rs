use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::search::matching_item_ids;
use crate::tui::app::{App, Mode, View};
use crate::tui::editor::EditField;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // --- cursor movement ---
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => {
            let count = app.visible_ids().len();
            if count > 0 && app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor = app.visible_ids().len().saturating_sub(1);
        }

        // --- expand/collapse notes ---
        (_, KeyCode::Enter) => {
            if let Some(id) = app.cursor_item_id()
                && !app.expanded.remove(&id)
            {
                app.expanded.insert(id);
            }
        }

        // --- the four input surfaces ---
        (_, KeyCode::Char('c')) => {
            let mut field = EditField::new(app.session_config());
            field.refresh(&app.vocabulary);
            app.capture = Some(field);
            app.mode = Mode::Capture;
        }
        (_, KeyCode::Char('e')) => {
            if let Some(id) = app.cursor_item_id()
                && let Some(item) = app.board.find(id)
            {
                let mut field = EditField::with_text(item.text.clone(), app.session_config());
                field.refresh(&app.vocabulary);
                app.edit = Some((id, field));
                app.mode = Mode::Edit;
            }
        }
        (_, KeyCode::Char('m')) => {
            if let Some(id) = app.cursor_item_id() {
                let mut field = EditField::new(app.session_config());
                field.refresh(&app.vocabulary);
                app.note = Some((id, field));
                app.mode = Mode::Note;
            }
        }
        (_, KeyCode::Char('p')) => {
            app.draft.refresh(&app.vocabulary);
            app.view = View::Draft;
        }

        // --- item state ---
        (_, KeyCode::Char('d')) => {
            if let Some(id) = app.cursor_item_id() {
                app.board.toggle_done(id);
                app.persist();
                app.clamp_cursor();
            }
        }
        (_, KeyCode::Char('x')) => {
            if let Some(id) = app.cursor_item_id() {
                app.board.remove(id);
                app.expanded.remove(&id);
                app.persist();
                app.clamp_cursor();
            }
        }
        (_, KeyCode::Char('D')) => {
            app.show_done = !app.show_done;
            app.clamp_cursor();
        }

        // --- search ---
        (_, KeyCode::Char('/')) => {
            app.search_input.clear();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Char('n')) => jump_to_match(app, 1),
        (_, KeyCode::Char('N')) => jump_to_match(app, -1),
        (_, KeyCode::Esc) => {
            // Clear the search highlight, like vim's :noh.
            app.last_search = None;
        }

        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }
        _ => {}
    }
}

/// Move the cursor to the next/previous visible item matching the active
/// search, wrapping around the list.
pub(super) fn jump_to_match(app: &mut App, direction: i32) {
    let Some(re) = app.active_search_re() else {
        return;
    };
    let matching = matching_item_ids(&app.board, &re);
    let visible = app.visible_ids();
    let hits: Vec<usize> = visible
        .iter()
        .enumerate()
        .filter(|(_, id)| matching.contains(id))
        .map(|(idx, _)| idx)
        .collect();
    if hits.is_empty() {
        return;
    }

    app.cursor = if direction >= 0 {
        *hits
            .iter()
            .find(|&&idx| idx > app.cursor)
            .unwrap_or(&hits[0])
    } else {
        *hits
            .iter()
            .rev()
            .find(|&&idx| idx < app.cursor)
            .unwrap_or(hits.last().unwrap_or(&0))
    };
}
