//! Terminal rendering using ratatui.
//!
//! - [`common`]: header bar, status bar, help overlay
//! - [`graph`]: the element panels (hover targets)
//! - [`popup`]: per-element metric popup overlays
//! - [`theme`]: colors and styles, light/dark aware

pub mod common;
pub mod graph;
pub mod popup;
pub mod theme;

pub use theme::Theme;
