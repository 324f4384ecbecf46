//! Per-element hover session state machine.
//!
//! One controller serves all element kinds; the per-kind differences
//! (URL, cadence, renderer) are data resolved when a session starts.
//! Each element has a monotonic generation counter that outlives its
//! sessions: starting or stopping a session bumps it, and every metric
//! update carries the generation it was issued under, so a response
//! that arrives after its session ended is discarded unapplied.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::diagram::{ElementKind, GraphElement};

use super::endpoint::{Cadences, ContentRenderer, Endpoints};
use super::fetch::Fetcher;
use super::{poller, MonitorUpdate};

/// One live hover session.
#[derive(Debug)]
struct ActiveSession {
    generation: u64,
    kind: ElementKind,
    /// The poll task, absent for a process node whose pid is still
    /// resolving (it starts on resolution if the session is still live).
    poller: Option<JoinHandle<()>>,
}

/// The hover session controller.
///
/// Owns every element's session state; at most one live session exists
/// per element, and starting a new one always stops the previous one
/// first.
pub struct HoverController {
    endpoints: Endpoints,
    cadences: Cadences,
    record_limit: usize,
    fetcher: Arc<dyn Fetcher>,
    runtime: Handle,
    updates: mpsc::UnboundedSender<MonitorUpdate>,
    /// Per-element monotonic generation counters. Entries persist
    /// across sessions so generations strictly increase.
    generations: HashMap<String, u64>,
    active: HashMap<String, ActiveSession>,
}

impl HoverController {
    pub fn new(
        endpoints: Endpoints,
        cadences: Cadences,
        record_limit: usize,
        fetcher: Arc<dyn Fetcher>,
        runtime: Handle,
        updates: mpsc::UnboundedSender<MonitorUpdate>,
    ) -> Self {
        Self {
            endpoints,
            cadences,
            record_limit,
            fetcher,
            runtime,
            updates,
            generations: HashMap::new(),
            active: HashMap::new(),
        }
    }

    /// Pointer entered an element: stop any previous session for it,
    /// mint the next generation and start polling.
    ///
    /// A process node whose pid is not yet resolved goes Active without
    /// a poller; [`Self::identity_resolved`] starts it later. No pid
    /// means no request is ever issued.
    pub fn enter(&mut self, element: &GraphElement, pid: Option<i32>) -> Result<()> {
        self.leave(&element.id);

        let generation = self.next_generation(&element.id);
        debug!(id = %element.id, generation, "hover session start");

        let poller = match self.endpoints.metric_url(element, pid)? {
            Some(url) => Some(self.spawn_poller(element, url, generation)),
            None => None,
        };

        self.active.insert(
            element.id.clone(),
            ActiveSession {
                generation,
                kind: element.kind,
                poller,
            },
        );
        Ok(())
    }

    /// Pointer left an element: abort its poller and invalidate its
    /// generation so in-flight responses render nowhere.
    pub fn leave(&mut self, element_id: &str) {
        if let Some(session) = self.active.remove(element_id) {
            debug!(id = %element_id, generation = session.generation, "hover session stop");
            if let Some(handle) = session.poller {
                handle.abort();
            }
            self.next_generation(element_id);
        }
    }

    /// A process identity resolved: if the element still has a live
    /// session that was waiting on it, start its poller now under the
    /// session's existing generation.
    pub fn identity_resolved(&mut self, element: &GraphElement, pid: i32) -> Result<()> {
        let Some(session) = self.active.get(&element.id) else {
            return Ok(());
        };
        if session.kind != ElementKind::ProcessNode || session.poller.is_some() {
            return Ok(());
        }

        let generation = session.generation;
        let url = self.endpoints.rusage_url(pid)?;
        let poller = self.spawn_poller(element, url, generation);
        if let Some(session) = self.active.get_mut(&element.id) {
            session.poller = Some(poller);
        }
        Ok(())
    }

    /// Whether a metric update tagged with this generation belongs to
    /// the element's current live session.
    pub fn is_current(&self, element_id: &str, generation: u64) -> bool {
        self.active
            .get(element_id)
            .is_some_and(|session| session.generation == generation)
    }

    /// Whether the element has a live session.
    pub fn is_active(&self, element_id: &str) -> bool {
        self.active.contains_key(element_id)
    }

    /// The element's generation counter (the last minted value).
    pub fn generation_of(&self, element_id: &str) -> u64 {
        self.generations.get(element_id).copied().unwrap_or(0)
    }

    /// Stop every live session.
    pub fn stop_all(&mut self) {
        let ids: Vec<String> = self.active.keys().cloned().collect();
        for id in ids {
            self.leave(&id);
        }
    }

    fn next_generation(&mut self, element_id: &str) -> u64 {
        let counter = self.generations.entry(element_id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    fn spawn_poller(&self, element: &GraphElement, url: url::Url, generation: u64) -> JoinHandle<()> {
        poller::spawn(
            &self.runtime,
            self.fetcher.clone(),
            url,
            self.cadences.for_kind(element.kind),
            ContentRenderer::for_kind(element.kind, self.record_limit),
            element.id.clone(),
            generation,
            self.updates.clone(),
        )
    }
}

impl Drop for HoverController {
    fn drop(&mut self) {
        self.stop_all();
    }
}
