//! Per-element popup surfaces.
//!
//! Every graph element owns its own popup surface, keyed by element id
//! in the App. A late metric response therefore can never redisplay or
//! clobber another element's popup; together with the session
//! generation gate this removes the shared-popup race class entirely.

use serde::Deserialize;

use crate::format::ThroughputView;

/// One resource-usage record for a process, as served by the
/// monitoring endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessRecord {
    /// The command line of the process.
    pub command: String,
    /// Ordered key/value details (cpu, memory, state, ...).
    pub kv: Vec<KvPair>,
}

/// A single key/value detail row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KvPair {
    pub k: String,
    pub v: String,
}

/// What a popup currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupContent {
    /// Session is active but no data has arrived yet (or the process
    /// identity is still resolving).
    Waiting,
    /// Throughput figures for a pipe or store.
    Throughput(ThroughputView),
    /// Resource-usage records for a process.
    Process(Vec<ProcessRecord>),
}

/// The state of one element's popup surface.
#[derive(Debug, Clone)]
pub struct PopupState {
    pub visible: bool,
    /// Terminal cell the popup is anchored near (captured at
    /// pointer-enter).
    pub anchor: (u16, u16),
    pub content: PopupContent,
}

impl PopupState {
    /// A freshly shown popup with no data yet.
    pub fn shown_at(anchor: (u16, u16)) -> Self {
        Self {
            visible: true,
            anchor,
            content: PopupContent::Waiting,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
