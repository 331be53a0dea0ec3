pub mod completion;
pub mod draft_view;
pub mod help_overlay;
pub mod queue_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use crate::tui::editor::EditField;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::app::{App, View};

/// Main render function — dispatches to sub-renderers.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title row | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_title_row(frame, app, chunks[0]);

    // The active view sets the anchor if an input is live.
    app.popup_anchor = None;

    match app.view {
        View::Queue => queue_view::render_queue(frame, app, chunks[1]),
        View::Draft => draft_view::render_draft(frame, app, chunks[1]),
    }

    if app.show_help {
        help_overlay::render_help(frame, app, area);
    }

    // Completion dropdown floats above everything else.
    completion::render_dropdown(frame, app, area);

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_title_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let open = app.board.open_count();
    let label = match app.view {
        View::Queue => format!("queue · {} open", open),
        View::Draft => "draft".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            "[>] jot ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(label, Style::default().fg(app.theme.dim).bg(bg)),
    ];

    let width = area.width as usize;
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Render an input field's single line as spans with a block cursor.
/// Returns the display column of the cursor within the field text.
pub(super) fn input_spans(field: &EditField, theme: &Theme) -> (Vec<Span<'static>>, u16) {
    let text_style = Style::default().fg(theme.text_bright);
    let cursor_style = Style::default()
        .fg(theme.background)
        .bg(theme.highlight);

    let buffer = &field.buffer;
    let cursor = field.cursor.min(buffer.len());
    let before = &buffer[..cursor];
    let after = &buffer[cursor..];

    let cursor_cell: String = after.chars().next().map_or(" ".to_string(), String::from);
    let rest: &str = after
        .char_indices()
        .nth(1)
        .map_or("", |(i, _)| &after[i..]);

    let mut spans = Vec::new();
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), text_style));
    }
    spans.push(Span::styled(cursor_cell, cursor_style));
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    (spans, unicode::byte_offset_to_display_col(buffer, cursor) as u16)
}

/// Push spans for text with regex match highlighting. If no regex or no
/// matches, pushes a single span with `base_style`.
pub(super) fn push_highlighted_spans(
    spans: &mut Vec<Span<'static>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
