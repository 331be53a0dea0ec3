use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Maximum number of visible entries in the dropdown.
const MAX_VISIBLE: usize = 8;

/// Render the completion dropdown anchored at the active input's cursor.
pub fn render_dropdown(frame: &mut Frame, app: &App, term_area: Rect) {
    let Some(field) = app.active_field() else {
        return;
    };
    let session = &field.session;
    if !session.is_open() || session.suggestions().is_empty() {
        return;
    }
    let Some((ax, ay)) = app.popup_anchor else {
        return;
    };

    let bg = app.theme.background;
    let suggestions = session.suggestions();
    let selected = session.selected();
    let count = suggestions.len().min(MAX_VISIBLE);

    let max_width = suggestions
        .iter()
        .take(MAX_VISIBLE)
        .map(|s| unicode::display_width(s))
        .max()
        .unwrap_or(10)
        + 4; // marker + padding

    let popup_w = (max_width as u16)
        .min(term_area.width.saturating_sub(2))
        .max(12);
    let popup_h = count as u16 + 2; // +2 for borders

    // Below the cursor if there is room, above otherwise.
    let y = if ay + 1 + popup_h <= term_area.height {
        ay + 1
    } else {
        ay.saturating_sub(popup_h)
    };
    let x = ax.min(term_area.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    // Scroll window around the selected entry.
    let scroll_start = if selected >= MAX_VISIBLE {
        selected - MAX_VISIBLE + 1
    } else {
        0
    };

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in suggestions
        .iter()
        .skip(scroll_start)
        .take(MAX_VISIBLE)
        .enumerate()
    {
        let is_selected = scroll_start + i == selected;
        let style = if is_selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let marker = if is_selected { " \u{25B8} " } else { "   " };
        let label = format!(
            "{:<width$}",
            entry,
            width = (popup_w as usize).saturating_sub(5)
        );
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(label, style),
        ]));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        popup_area,
    );
}
