//! Application state and hover logic.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::diagram::{self, ElementKind, GraphElement};
use crate::highlight::HighlightMap;
use crate::identity::PidCache;
use crate::monitor::{BusyGauge, Endpoints, Fetcher, HoverController, MonitorUpdate};
use crate::popup::PopupState;
use crate::settings::Settings;
use crate::ui::Theme;

/// Stroke/fill override color for hovered elements.
pub const HIGHLIGHT_COLOR: &str = "blue";

/// A hover target rectangle from the last draw, in draw order.
#[derive(Debug, Clone)]
pub struct ElementHit {
    pub id: String,
    pub rect: Rect,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub theme: Theme,

    // Diagram
    diagram_path: PathBuf,
    pub elements: Vec<GraphElement>,
    pub load_error: Option<String>,

    // Hover machinery
    pub pids: PidCache,
    pub highlight: HighlightMap,
    pub popups: HashMap<String, PopupState>,
    pub hovered: Option<String>,
    /// Element hit rectangles, rebuilt by the graph panel every draw.
    pub hits: Vec<ElementHit>,

    controller: HoverController,
    updates: mpsc::UnboundedReceiver<MonitorUpdate>,
    update_tx: mpsc::UnboundedSender<MonitorUpdate>,
    endpoints: Endpoints,
    fetcher: Arc<dyn Fetcher>,
    runtime: Handle,

    // UI chrome
    pub busy: BusyGauge,
    pub settings: Settings,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App. The diagram is not loaded yet; call
    /// [`Self::reload_diagram`] once after construction.
    pub fn new(
        settings: Settings,
        diagram_path: PathBuf,
        fetcher: Arc<dyn Fetcher>,
        busy: BusyGauge,
        runtime: Handle,
    ) -> Result<Self> {
        let endpoints = Endpoints::new(settings.endpoint_url()?);
        let (update_tx, updates) = mpsc::unbounded_channel();
        let controller = HoverController::new(
            endpoints.clone(),
            settings.cadences(),
            settings.record_limit,
            fetcher.clone(),
            runtime.clone(),
            update_tx.clone(),
        );

        Ok(Self {
            running: true,
            show_help: false,
            theme: Theme::auto_detect(),
            diagram_path,
            elements: Vec::new(),
            load_error: None,
            pids: PidCache::new(),
            highlight: HighlightMap::new(),
            popups: HashMap::new(),
            hovered: None,
            hits: Vec::new(),
            controller,
            updates,
            update_tx,
            endpoints,
            fetcher,
            runtime,
            busy,
            settings,
            status_message: None,
        })
    }

    /// (Re)load and classify the diagram, then prefetch process
    /// identities so pids are likely cached before the first hover.
    ///
    /// A missing or malformed diagram leaves the overlay inert (no
    /// elements, a status message) rather than failing.
    pub fn reload_diagram(&mut self) {
        self.hover_to(None, (0, 0));

        match diagram::svg::load(&self.diagram_path) {
            Ok(groups) => {
                let classified = diagram::classify(groups);
                info!(
                    elements = classified.elements.len(),
                    processes = classified.process_ids.len(),
                    "diagram classified"
                );
                self.pids.prefetch(
                    &classified.process_ids,
                    &self.endpoints,
                    self.fetcher.clone(),
                    &self.runtime,
                    self.update_tx.clone(),
                );
                self.elements = classified.elements;
                self.popups.clear();
                self.load_error = None;
            }
            Err(e) => {
                warn!(error = %e, "diagram unavailable, overlay inert");
                self.elements = Vec::new();
                self.popups.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Move the hover to a new target (or to nothing).
    ///
    /// Leaving and entering happen in the same turn: the old element's
    /// poller is stopped, its popup hidden and its highlight reverted
    /// before the new session starts. Hovering the already-hovered
    /// element is a no-op (the anchor stays where the popup appeared).
    pub fn hover_to(&mut self, target: Option<String>, anchor: (u16, u16)) {
        if self.hovered == target {
            return;
        }

        if let Some(prev) = self.hovered.take() {
            self.controller.leave(&prev);
            if let Some(popup) = self.popups.get_mut(&prev) {
                popup.hide();
            }
            if let Some(index) = self.element_index(&prev) {
                self.highlight.revert(&mut self.elements[index]);
            }
        }

        let Some(id) = target else {
            return;
        };
        let Some(index) = self.element_index(&id) else {
            return;
        };

        self.highlight.highlight(&mut self.elements[index], HIGHLIGHT_COLOR);
        self.popups.insert(id.clone(), PopupState::shown_at(anchor));

        let pid = self.pids.pid_of(&id);
        if let Err(e) = self.controller.enter(&self.elements[index], pid) {
            warn!(id = %id, error = %e, "could not start hover session");
            self.set_status_message(format!("session failed: {}", e));
        }
        self.hovered = Some(id);
    }

    /// Drain pending updates from pollers and identity lookups,
    /// applying each in turn. Stale metric updates (generation no
    /// longer current) are discarded here.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            match update {
                MonitorUpdate::Metric {
                    element_id,
                    generation,
                    content,
                } => {
                    if !self.controller.is_current(&element_id, generation) {
                        continue;
                    }
                    if let Some(popup) = self.popups.get_mut(&element_id) {
                        popup.content = content;
                    }
                }
                MonitorUpdate::Identity { node_id, pid } => {
                    self.pids.complete(&node_id, pid);
                    if let Some(index) = self.element_index(&node_id) {
                        if let Err(e) =
                            self.controller.identity_resolved(&self.elements[index], pid)
                        {
                            warn!(id = %node_id, error = %e, "could not start deferred session");
                        }
                    }
                }
            }
        }
    }

    /// Hover the next element in draw order (keyboard navigation).
    pub fn hover_next(&mut self) {
        self.hover_step(1);
    }

    /// Hover the previous element in draw order.
    pub fn hover_prev(&mut self) {
        self.hover_step(-1);
    }

    fn hover_step(&mut self, direction: isize) {
        if self.hits.is_empty() {
            return;
        }
        let len = self.hits.len() as isize;
        let current = self
            .hovered
            .as_ref()
            .and_then(|id| self.hits.iter().position(|h| &h.id == id));
        let next = match current {
            Some(index) => (index as isize + direction).rem_euclid(len) as usize,
            None if direction > 0 => 0,
            None => (len - 1) as usize,
        };
        let hit = self.hits[next].clone();
        let anchor = (hit.rect.x + hit.rect.width / 2, hit.rect.y);
        self.hover_to(Some(hit.id), anchor);
    }

    /// Look up the element under a terminal cell, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<String> {
        let position = ratatui::layout::Position::new(column, row);
        self.hits
            .iter()
            .find(|h| h.rect.contains(position))
            .map(|h| h.id.clone())
    }

    pub fn element_index(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn element_of(&self, id: &str) -> Option<&GraphElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    /// Set a temporary status message shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit, stopping all sessions.
    pub fn quit(&mut self) {
        self.controller.stop_all();
        self.running = false;
    }
}
