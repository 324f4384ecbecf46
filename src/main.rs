// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod diagram;
mod duration;
mod events;
mod format;
mod highlight;
mod identity;
mod monitor;
mod popup;
mod settings;
mod ui;

use app::App;
use monitor::{BusyGauge, HttpFetcher};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "flowscope")]
#[command(about = "Live throughput and resource metrics on a rendered process pipeline graph")]
struct Args {
    /// Path to the rendered pipeline diagram (SVG)
    #[arg(short, long)]
    diagram: PathBuf,

    /// Base URL of the monitoring endpoint
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipe/store polling cadence (e.g. "500ms")
    #[arg(long)]
    pipe_cadence: Option<String>,

    /// Process polling cadence (e.g. "3s")
    #[arg(long)]
    process_cadence: Option<String>,

    /// Record sample truncation threshold, in characters
    #[arg(long)]
    record_limit: Option<usize>,

    /// Append logs to this file (the terminal belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    // Layered settings: defaults <- file <- environment <- CLI flags
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(ref cadence) = args.pipe_cadence {
        let parsed = duration::parse_cadence(cadence)
            .with_context(|| format!("invalid --pipe-cadence: {}", cadence))?;
        settings.pipe_cadence_ms = parsed.as_millis() as u64;
    }
    if let Some(ref cadence) = args.process_cadence {
        let parsed = duration::parse_cadence(cadence)
            .with_context(|| format!("invalid --process-cadence: {}", cadence))?;
        settings.process_cadence_ms = parsed.as_millis() as u64;
    }
    if let Some(limit) = args.record_limit {
        settings.record_limit = limit;
    }

    // The async runtime carries the pollers and identity lookups; the
    // TUI loop stays on the main thread.
    let runtime = tokio::runtime::Runtime::new()?;

    let busy = BusyGauge::new();
    let fetcher = Arc::new(HttpFetcher::new(busy.clone())?);
    let mut app = App::new(
        settings,
        args.diagram,
        fetcher,
        busy,
        runtime.handle().clone(),
    )?;

    run_tui(&mut app)
}

fn init_logging(path: &std::path::Path) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI for the given app.
fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Classify the diagram and prefetch process identities
    app.reload_diagram();

    // Run the main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        // Apply pending metric/identity updates before drawing
        app.drain_updates();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    area.height.min(5),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(6),    // Element panels
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::graph::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            // Popups draw over the panels, near the pointer
            ui::popup::render(frame, app, area);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(50))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}
