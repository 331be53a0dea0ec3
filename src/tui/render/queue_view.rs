use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::{input_spans, push_highlighted_spans};

/// One screen row of the queue, plus where a live input's cursor sits.
struct Row {
    line: Line<'static>,
    /// Display column of an input cursor in this row, if the row hosts
    /// the active input (used to anchor the completion dropdown).
    anchor_col: Option<u16>,
    is_cursor_row: bool,
}

/// Render the item queue: optional capture input on top, then items with
/// their expanded notes, the inline editor, and the note input.
pub fn render_queue(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let search_re = app.active_search_re();

    let base = Style::default().fg(theme.text);
    let bright = Style::default().fg(theme.text_bright);
    let dim = Style::default().fg(theme.dim);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let mut rows: Vec<Row> = Vec::new();

    // Quick-capture input above the list.
    if app.mode == Mode::Capture
        && let Some(field) = &app.capture
    {
        let (spans, col) = input_spans(field, &theme);
        let mut line_spans = vec![Span::styled(
            "+ ",
            Style::default().fg(theme.highlight),
        )];
        line_spans.extend(spans);
        rows.push(Row {
            line: Line::from(line_spans),
            anchor_col: Some(2 + col),
            is_cursor_row: false,
        });
        rows.push(Row {
            line: Line::default(),
            anchor_col: None,
            is_cursor_row: false,
        });
    }

    let visible = app.visible_ids();
    for (idx, id) in visible.iter().enumerate() {
        let Some(item) = app.board.find(*id) else {
            continue;
        };
        let is_cursor_row = idx == app.cursor;

        // Item row: inline editor replaces the text while editing.
        let edit_field = match (&app.edit, app.mode) {
            (Some((eid, field)), Mode::Edit) if eid == id => Some(field),
            _ => None,
        };
        if let Some(field) = edit_field {
            let (spans, col) = input_spans(field, &theme);
            let mut line_spans = vec![Span::styled("· ", dim)];
            line_spans.extend(spans);
            rows.push(Row {
                line: Line::from(line_spans),
                anchor_col: Some(2 + col),
                is_cursor_row,
            });
        } else {
            // Leave room for the marker and the note-count badge.
            let text =
                unicode::truncate_to_width(&item.text, (area.width as usize).saturating_sub(9));
            let mut spans = Vec::new();
            if item.done {
                spans.push(Span::styled("x ", dim));
                push_highlighted_spans(
                    &mut spans,
                    &text,
                    dim.add_modifier(Modifier::CROSSED_OUT),
                    match_style,
                    search_re.as_ref(),
                );
            } else {
                spans.push(Span::styled("· ", Style::default().fg(theme.green)));
                push_highlighted_spans(
                    &mut spans,
                    &text,
                    if is_cursor_row { bright } else { base },
                    match_style,
                    search_re.as_ref(),
                );
            }
            if !item.notes.is_empty() && !app.expanded.contains(id) {
                spans.push(Span::styled(format!("  [{}]", item.notes.len()), dim));
            }
            rows.push(Row {
                line: Line::from(spans),
                anchor_col: None,
                is_cursor_row,
            });
        }

        // Expanded notes under the item.
        if app.expanded.contains(id) {
            for note in &item.notes {
                let mut spans = vec![Span::styled("    ↳ ", dim)];
                push_highlighted_spans(
                    &mut spans,
                    &note.text,
                    base,
                    match_style,
                    search_re.as_ref(),
                );
                spans.push(Span::styled(
                    format!("  {}", note.created.format("%Y-%m-%d")),
                    dim,
                ));
                rows.push(Row {
                    line: Line::from(spans),
                    anchor_col: None,
                    is_cursor_row: false,
                });
            }
        }

        // Note input under the item it annotates.
        let note_field = match (&app.note, app.mode) {
            (Some((nid, field)), Mode::Note) if nid == id => Some(field),
            _ => None,
        };
        if let Some(field) = note_field {
            let (spans, col) = input_spans(field, &theme);
            let mut line_spans = vec![Span::styled("    ↳ ", dim)];
            line_spans.extend(spans);
            rows.push(Row {
                line: Line::from(line_spans),
                anchor_col: Some(6 + col),
                is_cursor_row: false,
            });
        }
    }

    if visible.is_empty() && app.mode != Mode::Capture {
        rows.push(Row {
            line: Line::from(Span::styled("queue is empty · c captures", dim)),
            anchor_col: None,
            is_cursor_row: false,
        });
    }

    // Keep the cursor row (or the active input row) inside the viewport.
    let height = area.height as usize;
    let focus_row = rows
        .iter()
        .position(|r| r.anchor_col.is_some())
        .or_else(|| rows.iter().position(|r| r.is_cursor_row))
        .unwrap_or(0);
    if focus_row < app.scroll_offset {
        app.scroll_offset = focus_row;
    }
    if height > 0 && focus_row >= app.scroll_offset + height {
        app.scroll_offset = focus_row + 1 - height;
    }
    app.scroll_offset = app.scroll_offset.min(rows.len().saturating_sub(1));

    let mut lines = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(app.scroll_offset).take(height) {
        let mut line = row.line.clone();
        if row.is_cursor_row {
            line = line.style(Style::default().bg(theme.selection_bg));
        }
        if let Some(col) = row.anchor_col {
            let y = area.y + (idx - app.scroll_offset) as u16;
            let x = (area.x + col).min(area.x + area.width.saturating_sub(1));
            app.popup_anchor = Some((x, y));
        }
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
