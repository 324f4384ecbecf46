//! Per-element metric popup overlays.
//!
//! Each visible popup is drawn near the pointer position captured when
//! its hover session started, clamped to the terminal. Pipes and
//! stores show throughput figures; processes show a table of command
//! and key/value rows per resource record.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::popup::{PopupContent, PopupState, ProcessRecord};

/// Popup width in terminal cells (before clamping to the frame).
const POPUP_WIDTH: u16 = 44;
/// Horizontal offset from the anchor, keeping the pointer visible.
const ANCHOR_OFFSET_X: u16 = 3;
/// Cap on popup height so a long record list cannot cover the screen.
const MAX_POPUP_HEIGHT: u16 = 20;

/// Render every visible popup surface.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    for (id, popup) in &app.popups {
        if !popup.visible {
            continue;
        }
        let Some(element) = app.element_of(id) else {
            continue;
        };
        render_one(frame, app, area, &element.label, popup);
    }
}

fn render_one(frame: &mut Frame, app: &App, area: Rect, label: &str, popup: &PopupState) {
    let lines = content_lines(app, &popup.content);

    let width = POPUP_WIDTH.min(area.width);
    let height = (lines.len() as u16 + 2).clamp(3, MAX_POPUP_HEIGHT.min(area.height));

    // Anchor to the right of the pointer, clamped to stay on screen.
    let (anchor_x, anchor_y) = popup.anchor;
    let x = (anchor_x + ANCHOR_OFFSET_X).min(area.right().saturating_sub(width));
    let y = (anchor_y + 1).min(area.bottom().saturating_sub(height));
    let rect = Rect::new(x, y, width, height);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(format!(" {} ", label));
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, rect);
}

fn content_lines<'a>(app: &App, content: &'a PopupContent) -> Vec<Line<'a>> {
    match content {
        PopupContent::Waiting => vec![Line::styled("waiting for data...", app.theme.dim)],
        PopupContent::Throughput(view) => vec![
            stat_line("bytes", &view.bytes),
            stat_line("lines", &view.lines),
            stat_line("bytes/sec", &view.bytes_per_sec),
            stat_line("lines/sec", &view.lines_per_sec),
            Line::raw(""),
            Line::styled("last record:", app.theme.dim),
            Line::raw(view.record.as_str()),
        ],
        PopupContent::Process(records) => process_lines(app, records),
    }
}

fn stat_line<'a>(name: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", name), Style::default().add_modifier(Modifier::DIM)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn process_lines<'a>(app: &App, records: &'a [ProcessRecord]) -> Vec<Line<'a>> {
    if records.is_empty() {
        return vec![Line::styled("no process records", app.theme.dim)];
    }

    let mut lines = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            lines.push(Line::styled("─".repeat(POPUP_WIDTH as usize - 2), app.theme.dim));
        }
        lines.push(Line::styled(
            record.command.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for pair in &record.kv {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", pair.k), app.theme.dim),
                Span::raw(pair.v.as_str()),
            ]));
        }
    }
    lines
}
