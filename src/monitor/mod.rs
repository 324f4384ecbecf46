//! Hover-driven live metric monitoring.
//!
//! This module owns everything between a pointer entering a graph
//! element and formatted metrics appearing in its popup: endpoint
//! addressing, the HTTP fetch seam, the per-hover poll session state
//! machine, and the busy indicator.
//!
//! ## Architecture
//!
//! ```text
//! pointer-enter ──▶ HoverController ──spawn──▶ poller task (tokio)
//!                        │                          │ fetch + render
//!                        │ generation gate          ▼
//! main loop ◀──────── mpsc channel ◀──── MonitorUpdate::Metric
//!                        ▲
//! identity prefetch ─────┘ (MonitorUpdate::Identity)
//! ```
//!
//! Poll tasks never touch application state directly: they push
//! [`MonitorUpdate`]s over a channel and the main loop applies them one
//! at a time, discarding any update whose generation is no longer the
//! element's current session.

pub mod busy;
pub mod endpoint;
pub mod fetch;
pub mod poller;
pub mod session;

pub use busy::BusyGauge;
pub use endpoint::{Cadences, ContentRenderer, Endpoints};
pub use fetch::{Fetcher, HttpFetcher};
pub use session::HoverController;

use crate::popup::PopupContent;

/// An update pushed from a background task to the main loop.
#[derive(Debug)]
pub enum MonitorUpdate {
    /// A rendered metric response from a poll session.
    Metric {
        element_id: String,
        /// The generation the session had when this poll was issued;
        /// stale generations are discarded unapplied.
        generation: u64,
        content: PopupContent,
    },
    /// A resolved process identity.
    Identity { node_id: String, pid: i32 },
}
