//! Common UI components: header bar, status bar, help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::diagram::ElementKind;
use crate::duration::format_cadence;

/// Render the header bar: app name, element counts, endpoint, and the
/// busy spinner while any request is in flight.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let processes = app.count_of(ElementKind::ProcessNode);
    let pipes = app.count_of(ElementKind::PipeEdge);
    let stores = app.count_of(ElementKind::StoreNode);

    let mut spans = vec![
        Span::styled(" FLOWSCOPE ", app.theme.header),
        Span::raw("│ "),
        Span::raw(format!("{} processes  {} pipes  {} stores", processes, pipes, stores)),
        Span::raw("  │ "),
        Span::styled(app.settings.endpoint.clone(), app.theme.dim),
    ];
    if app.busy.is_busy() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "⟳",
            Style::default().fg(app.theme.busy).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar: hovered element details on the left, a
/// transient status message or the key hints on the right.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left = match app.hovered.as_deref().and_then(|id| app.element_of(id)) {
        Some(element) => {
            let cadence = app.settings.cadences().for_kind(element.kind);
            format!(
                " {} ({}, every {})",
                element.label,
                element.kind.label(),
                format_cadence(cadence)
            )
        }
        None => " hover an element for live metrics".to_string(),
    };

    let right = match app.get_status_message() {
        Some(msg) => msg.to_string(),
        None => "q quit  ? help  r reload ".to_string(),
    };

    let pad = (area.width as usize).saturating_sub(left.len() + right.len());
    let line = Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, app.theme.dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help overlay.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let width = 46.min(area.width);
    let height = 12.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay);

    let lines = vec![
        Line::raw(""),
        key_line("mouse move", "hover an element"),
        key_line("j/k, arrows", "walk elements"),
        key_line("Esc", "clear hover"),
        key_line("r", "reload diagram"),
        key_line("?", "toggle this help"),
        key_line("q", "quit"),
        Line::raw(""),
        Line::styled(
            "  hovering polls the monitoring endpoint",
            app.theme.dim,
        ),
        Line::styled("  and shows live metrics in a popup", app.theme.dim),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(" Help ")
        .title_alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn key_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", key),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(action.to_string()),
    ])
}
