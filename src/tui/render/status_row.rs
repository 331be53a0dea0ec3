use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

/// Render the status row (bottom of screen): transient messages, the
/// search prompt, or mode-appropriate key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);

    let completion_open = app.active_field().is_some_and(|f| f.session.is_open());

    let mut spans: Vec<Span> = Vec::new();
    let hint: &str;

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
        hint = "";
    } else if app.mode == Mode::Search {
        spans.push(Span::styled(format!("/{}", app.search_input), bright));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        hint = "Enter search  Esc cancel";
    } else if completion_open {
        hint = "Tab accept  \u{2191}\u{2193} cycle  Esc dismiss";
    } else {
        hint = match (app.view, app.mode) {
            (View::Draft, _) => "Esc back to queue",
            (_, Mode::Capture) => "Enter add  Esc done",
            (_, Mode::Edit) | (_, Mode::Note) => "Enter save  Esc cancel",
            _ => {
                if let Some(pattern) = &app.last_search {
                    spans.push(Span::styled(format!("/{}", pattern), dim));
                    "n/N next/prev"
                } else if app.config.ui.show_key_hints {
                    "c capture  e edit  m note  d done  p draft  / search  ? help"
                } else {
                    ""
                }
            }
        };
    }

    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    }
    if !hint.is_empty() {
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
