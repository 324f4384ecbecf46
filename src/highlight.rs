//! Per-element save/restore of shape styling.
//!
//! While an element is hovered its relevant sub-shapes are recolored;
//! on exit the original stroke/fill must come back byte-identical, no
//! matter how many redundant highlight calls happened in between.

use std::collections::HashMap;

use crate::diagram::{ElementKind, GraphElement, ShapeKind};

/// The styling captured from one sub-shape before it was overridden.
#[derive(Debug, Clone)]
struct SavedStyle {
    stroke: Option<String>,
    fill: Option<String>,
}

/// Tracks captured original styles, keyed by (element id, shape index).
///
/// Entries exist only while the element is highlighted; `revert`
/// removes them, so repeated hover cycles never accumulate state.
#[derive(Debug, Default)]
pub struct HighlightMap {
    saved: HashMap<(String, usize), SavedStyle>,
}

impl HighlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recolor the element's relevant sub-shapes, capturing their
    /// current styling first.
    ///
    /// Idempotent within a hover session: only the first call captures
    /// the originals; later calls recolor without touching the capture.
    pub fn highlight(&mut self, element: &mut GraphElement, color: &str) {
        for index in Self::target_shapes(element) {
            let shape = &mut element.shapes[index];
            self.saved
                .entry((element.id.clone(), index))
                .or_insert_with(|| SavedStyle {
                    stroke: shape.stroke.clone(),
                    fill: shape.fill.clone(),
                });

            shape.stroke = Some(color.to_string());
            // Paths are outlines only; their fill stays untouched.
            if shape.kind != ShapeKind::Path {
                shape.fill = Some(color.to_string());
            }
        }
    }

    /// Restore exactly the captured styling and clear the capture.
    pub fn revert(&mut self, element: &mut GraphElement) {
        for index in 0..element.shapes.len() {
            if let Some(saved) = self.saved.remove(&(element.id.clone(), index)) {
                let shape = &mut element.shapes[index];
                shape.stroke = saved.stroke;
                shape.fill = saved.fill;
            }
        }
    }

    /// Whether any capture is outstanding for the element.
    pub fn is_highlighted(&self, element_id: &str) -> bool {
        self.saved.keys().any(|(id, _)| id == element_id)
    }

    /// Sub-shape indices to recolor, by element kind: edges color every
    /// path and polygon; store and process nodes color their ellipse if
    /// present, else their polygon.
    fn target_shapes(element: &GraphElement) -> Vec<usize> {
        match element.kind {
            ElementKind::PipeEdge => {
                let mut targets = element.shapes_of(ShapeKind::Path);
                targets.extend(element.shapes_of(ShapeKind::Polygon));
                targets.sort_unstable();
                targets
            }
            ElementKind::StoreNode | ElementKind::ProcessNode => element
                .first_shape(ShapeKind::Ellipse)
                .or_else(|| element.first_shape(ShapeKind::Polygon))
                .into_iter()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Shape;

    fn edge() -> GraphElement {
        GraphElement {
            id: "e1".to_string(),
            kind: ElementKind::PipeEdge,
            metric_key: "e1".to_string(),
            label: "e1".to_string(),
            shapes: vec![
                Shape::new(ShapeKind::Path, Some("black".into()), Some("none".into())),
                Shape::new(ShapeKind::Polygon, Some("black".into()), Some("black".into())),
            ],
        }
    }

    fn node(kind: ElementKind, shapes: Vec<Shape>) -> GraphElement {
        GraphElement {
            id: "n1".to_string(),
            kind,
            metric_key: "n1".to_string(),
            label: "n1".to_string(),
            shapes,
        }
    }

    #[test]
    fn test_round_trip_restores_exactly() {
        let mut map = HighlightMap::new();
        let mut element = edge();
        let before = element.shapes.clone();

        map.highlight(&mut element, "blue");
        assert_ne!(element.shapes, before);

        map.revert(&mut element);
        assert_eq!(element.shapes, before);
        assert!(!map.is_highlighted("e1"));
    }

    #[test]
    fn test_repeated_highlight_keeps_first_capture() {
        let mut map = HighlightMap::new();
        let mut element = edge();
        let before = element.shapes.clone();

        // Any number of intervening no-op highlight calls must not
        // overwrite the captured originals.
        map.highlight(&mut element, "blue");
        map.highlight(&mut element, "blue");
        map.highlight(&mut element, "red");

        map.revert(&mut element);
        assert_eq!(element.shapes, before);
    }

    #[test]
    fn test_edge_colors_path_and_polygon() {
        let mut map = HighlightMap::new();
        let mut element = edge();

        map.highlight(&mut element, "blue");

        // Path: stroke only, fill untouched.
        assert_eq!(element.shapes[0].stroke.as_deref(), Some("blue"));
        assert_eq!(element.shapes[0].fill.as_deref(), Some("none"));
        // Polygon (arrowhead): stroke and fill.
        assert_eq!(element.shapes[1].stroke.as_deref(), Some("blue"));
        assert_eq!(element.shapes[1].fill.as_deref(), Some("blue"));
    }

    #[test]
    fn test_node_prefers_ellipse() {
        let mut map = HighlightMap::new();
        let mut element = node(
            ElementKind::ProcessNode,
            vec![
                Shape::new(ShapeKind::Polygon, Some("black".into()), None),
                Shape::new(ShapeKind::Ellipse, Some("black".into()), Some("none".into())),
            ],
        );

        map.highlight(&mut element, "blue");

        assert_eq!(element.shapes[0].stroke.as_deref(), Some("black"));
        assert_eq!(element.shapes[1].stroke.as_deref(), Some("blue"));
        assert_eq!(element.shapes[1].fill.as_deref(), Some("blue"));
    }

    #[test]
    fn test_node_falls_back_to_polygon() {
        let mut map = HighlightMap::new();
        let mut element = node(
            ElementKind::StoreNode,
            vec![Shape::new(ShapeKind::Polygon, Some("black".into()), Some("grey".into()))],
        );
        let before = element.shapes.clone();

        map.highlight(&mut element, "blue");
        assert_eq!(element.shapes[0].stroke.as_deref(), Some("blue"));

        map.revert(&mut element);
        assert_eq!(element.shapes, before);
    }

    #[test]
    fn test_revert_without_highlight_is_noop() {
        let mut map = HighlightMap::new();
        let mut element = edge();
        let before = element.shapes.clone();

        map.revert(&mut element);
        assert_eq!(element.shapes, before);
    }
}
