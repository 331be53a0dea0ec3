use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const BINDINGS: &[(&str, &str)] = &[
    ("j/k \u{2191}\u{2193}", "move"),
    ("Enter", "expand/collapse notes"),
    ("c", "capture a new item"),
    ("e", "edit item text"),
    ("m", "add a follow-up note"),
    ("p", "open the draft pad"),
    ("d", "toggle done"),
    ("x", "delete item"),
    ("D", "show/hide done items"),
    ("/", "search"),
    ("n/N", "next/previous match"),
    ("Tab", "accept completion (while open)"),
    ("Shift-Tab", "cycle completion backward"),
    ("Esc", "dismiss completion / cancel"),
    ("q", "quit"),
];

/// Render the help overlay centered on the screen.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);

    let w = 44u16.min(area.width.saturating_sub(2));
    let h = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let popup = Rect::new(x, y, w, h);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", key), key_style),
                Span::styled((*desc).to_string(), desc_style),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
