use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the draft pad: the scratch buffer with a block cursor.
pub fn render_draft(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let text_style = Style::default().fg(theme.text_bright);
    let cursor_style = Style::default().fg(theme.background).bg(theme.highlight);

    let (cursor_line, cursor_col) = app.draft.line_col();

    // Keep the cursor line inside the viewport.
    let height = area.height as usize;
    if cursor_line < app.draft_scroll {
        app.draft_scroll = cursor_line;
    }
    if height > 0 && cursor_line >= app.draft_scroll + height {
        app.draft_scroll = cursor_line + 1 - height;
    }

    let mut lines: Vec<Line> = Vec::new();
    let scroll = app.draft_scroll;
    for (idx, text) in app
        .draft
        .buffer
        .split('\n')
        .enumerate()
        .skip(scroll)
        .take(height)
    {
        if idx != cursor_line {
            lines.push(Line::from(Span::styled(text.to_string(), text_style)));
            continue;
        }

        // Cursor line: split around the cursor cell.
        let col = cursor_col.min(text.len());
        let before = &text[..col];
        let after = &text[col..];
        let cursor_cell: String = after.chars().next().map_or(" ".to_string(), String::from);
        let rest: &str = after.char_indices().nth(1).map_or("", |(i, _)| &after[i..]);

        let mut spans = Vec::new();
        if !before.is_empty() {
            spans.push(Span::styled(before.to_string(), text_style));
        }
        spans.push(Span::styled(cursor_cell, cursor_style));
        if !rest.is_empty() {
            spans.push(Span::styled(rest.to_string(), text_style));
        }
        lines.push(Line::from(spans));

        let x = area.x + unicode::byte_offset_to_display_col(text, col) as u16;
        let y = area.y + (idx - scroll) as u16;
        app.popup_anchor = Some((x.min(area.x + area.width.saturating_sub(1)), y));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
