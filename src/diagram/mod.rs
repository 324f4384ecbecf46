//! Diagram model and classification.
//!
//! This module turns a statically rendered process-pipeline diagram
//! (a graphviz-produced SVG) into a typed element model the rest of the
//! application operates on.
//!
//! ## Submodules
//!
//! - [`model`]: the mutable element model ([`GraphElement`], [`Shape`])
//! - [`svg`]: reading the rendered SVG document into raw elements
//! - [`classify`]: one-time partition into pipes, stores and processes
//!
//! ## Data flow
//!
//! ```text
//! rendered SVG (file)
//!        │
//!        ▼
//! svg::parse()            raw <g> groups with id/class/shapes/title
//!        │
//!        ▼
//! classify::classify()    GraphElement { kind, metric_key, label, shapes }
//!        │
//!        └──▶ process-node ids (for identity prefetch)
//! ```

pub mod classify;
pub mod model;
pub mod svg;

pub use classify::{classify, Classified};
pub use model::{ElementKind, GraphElement, Shape, ShapeKind};
