//! The element panels: the hover surface of the overlay.
//!
//! Renders the classified elements in three panels (processes, pipes,
//! stores), one row per element. Each row's rectangle is recorded as a
//! hit box for pointer hit-testing, and each row is tinted with its
//! element's current stroke color, so highlight state is visible
//! directly in the panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, ElementHit};
use crate::diagram::{ElementKind, GraphElement};
use crate::ui::theme::stroke_color;

/// Panel order: processes, pipes, stores.
const PANELS: [ElementKind; 3] = [
    ElementKind::ProcessNode,
    ElementKind::PipeEdge,
    ElementKind::StoreNode,
];

fn marker(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::ProcessNode => "●",
        ElementKind::PipeEdge => "→",
        ElementKind::StoreNode => "▣",
    }
}

fn panel_title(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::ProcessNode => " Processes ",
        ElementKind::PipeEdge => " Pipes ",
        ElementKind::StoreNode => " Stores ",
    }
}

/// Render the element panels and rebuild the hit boxes.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut hits: Vec<ElementHit> = Vec::new();

    if app.elements.is_empty() {
        let message = match &app.load_error {
            Some(e) => format!("diagram unavailable: {}\n\npress r to retry", e),
            None => "no elements in diagram".to_string(),
        };
        let paragraph = Paragraph::new(message)
            .alignment(ratatui::layout::Alignment::Center)
            .style(app.theme.dim);
        frame.render_widget(paragraph, area);
        app.hits = hits;
        return;
    }

    let chunks = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (chunk, kind) in chunks.iter().zip(PANELS) {
        render_panel(frame, app, *chunk, kind, &mut hits);
    }

    app.hits = hits;
}

fn render_panel(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    kind: ElementKind,
    hits: &mut Vec<ElementHit>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(panel_title(kind));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let elements: Vec<&GraphElement> =
        app.elements.iter().filter(|e| e.kind == kind).collect();
    let visible_rows = inner.height as usize;
    let shown = if elements.len() > visible_rows {
        visible_rows.saturating_sub(1)
    } else {
        elements.len()
    };

    for (i, element) in elements.iter().take(shown).enumerate() {
        let rect = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        let is_hovered = app.hovered.as_deref() == Some(element.id.as_str());

        // The row marker wears the element's current stroke color, so
        // a highlighted element visibly changes in the panel.
        let lead_stroke = element.shapes.first().and_then(|s| s.stroke.as_deref());
        let marker_style = match stroke_color(lead_stroke) {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        };

        let mut line = Line::from(vec![
            Span::styled(format!(" {} ", marker(kind)), marker_style),
            Span::raw(element.label.clone()),
        ]);
        if is_hovered {
            line = line.style(app.theme.selected);
        }

        frame.render_widget(Paragraph::new(line), rect);
        hits.push(ElementHit {
            id: element.id.clone(),
            rect,
        });
    }

    if elements.len() > shown && inner.height > 0 {
        let rect = Rect::new(inner.x, inner.y + shown as u16, inner.width, 1);
        let more = Paragraph::new(format!(" +{} more", elements.len() - shown))
            .style(app.theme.dim);
        frame.render_widget(more, rect);
    }
}
