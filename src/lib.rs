// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # flowscope
//!
//! An interactive TUI and library for watching live metrics on a
//! rendered process/data-flow pipeline graph.
//!
//! The graph layout step renders the pipeline once (processes, pipes
//! and stores as an SVG diagram); flowscope overlays it with live
//! data. Hovering any element starts a bounded polling session against
//! a monitoring HTTP endpoint and shows the element's throughput or
//! resource usage in its own popup, highlighted while hovered and
//! restored exactly on exit.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Application                            │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐   │
//! │  │ diagram │───▶│   app    │───▶│   ui    │───▶│ Terminal │   │
//! │  │(classify)    │ (hover)  │    │(render) │    │          │   │
//! │  └─────────┘    └────┬─────┘    └─────────┘    └──────────┘   │
//! │                      │ enter/leave                             │
//! │                      ▼                                         │
//! │  ┌──────────┐   ┌─────────┐   ┌─────────────────────────────┐ │
//! │  │ identity │◀──│ monitor │──▶│ pollers (tokio, per hover)  │ │
//! │  │ (pids)   │   │(sessions)   └──────────────┬──────────────┘ │
//! │  └──────────┘   └─────────┘     updates over │ mpsc channel   │
//! │                      ▲──────────────────────-┘                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`diagram`]**: reads the rendered SVG and partitions its
//!   elements into pipes, stores and processes
//! - **[`app`]**: application state and the hover state machine
//! - **[`monitor`]**: endpoint addressing, per-hover poll sessions
//!   with generation-tagged race avoidance, HTTP seam, busy gauge
//! - **[`identity`]**: graph-node-id → pid cache with single-flight
//!   prefetch
//! - **[`highlight`]**: save/restore of element stroke/fill
//! - **[`format`]**: thousands grouping, rates, record truncation
//! - **[`popup`]**: per-element popup surfaces
//! - **[`ui`]**: terminal rendering using ratatui
//!
//! ## Usage
//!
//! ```bash
//! # Watch the pipeline rendered in pipeline.svg
//! flowscope --diagram pipeline.svg --endpoint http://localhost:8080/
//! ```
//!
//! ## Consuming metrics as a library
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use flowscope::monitor::{BusyGauge, HttpFetcher};
//! use flowscope::{App, Settings};
//!
//! # fn main() -> anyhow::Result<()> {
//! let runtime = tokio::runtime::Runtime::new()?;
//! let busy = BusyGauge::new();
//! let fetcher = Arc::new(HttpFetcher::new(busy.clone())?);
//! let mut app = App::new(
//!     Settings::default(),
//!     "pipeline.svg".into(),
//!     fetcher,
//!     busy,
//!     runtime.handle().clone(),
//! )?;
//! app.reload_diagram();
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod diagram;
pub mod duration;
pub mod events;
pub mod format;
pub mod highlight;
pub mod identity;
pub mod monitor;
pub mod popup;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use diagram::{ElementKind, GraphElement};
pub use highlight::HighlightMap;
pub use identity::{PidCache, PidState};
pub use monitor::{HoverController, MonitorUpdate};
pub use popup::{PopupContent, PopupState};
pub use settings::Settings;
