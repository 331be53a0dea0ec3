use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::model::{Board, Config};
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 16;

/// Render the full UI into an in-memory buffer and return plain text
/// (no styles), with trailing blanks trimmed.
pub fn render_app_to_string(w: u16, h: u16, app: &mut App) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| super::render(frame, app)).unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over an empty board; no file I/O happens during render.
pub fn empty_app() -> App {
    App::new(
        Board::default(),
        Config::default(),
        PathBuf::from("/tmp/test-jot"),
    )
}

/// An app with a few items and a note.
pub fn sample_app() -> App {
    let mut board = Board::default();
    board.add_item("Implement the parser rewrite");
    board.add_item("Ship the release");
    board.add_item("Retire the old importer");
    board.add_note(1, "parser notes live in the wiki");
    board.toggle_done(3);
    App::new(board, Config::default(), PathBuf::from("/tmp/test-jot"))
}
