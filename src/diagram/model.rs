//! The diagram element model.
//!
//! Elements are created once at classification time and are immutable
//! afterwards, except for the stroke/fill of their shapes which the
//! highlight manager overrides transiently while an element is hovered.

/// Reserved id prefix marking a node as a data store.
pub const STORE_PREFIX: &str = "store:";

/// The kind of a classified graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// An edge carrying a data stream between two processes.
    PipeEdge,
    /// A node representing a persistent data store.
    StoreNode,
    /// A node representing a running process.
    ProcessNode,
}

impl ElementKind {
    /// Returns the display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::PipeEdge => "pipe",
            ElementKind::StoreNode => "store",
            ElementKind::ProcessNode => "process",
        }
    }
}

/// The drawable sub-shape kinds we track within an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Path,
    Polygon,
    Ellipse,
}

/// A drawable sub-shape with its runtime-mutable styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub stroke: Option<String>,
    pub fill: Option<String>,
}

impl Shape {
    pub fn new(kind: ShapeKind, stroke: Option<String>, fill: Option<String>) -> Self {
        Self { kind, stroke, fill }
    }
}

/// A classified element of the rendered diagram.
#[derive(Debug, Clone)]
pub struct GraphElement {
    /// Unique identifier within the diagram (as rendered).
    pub id: String,
    pub kind: ElementKind,
    /// Key used to address the metric endpoint: the id with the
    /// `store:` prefix already stripped for stores, the id itself
    /// otherwise. Resolved once at classification time.
    pub metric_key: String,
    /// Human-readable label, recovered from the renderer tooltip
    /// before it was stripped. Falls back to the id.
    pub label: String,
    /// Drawable sub-shapes in document order.
    pub shapes: Vec<Shape>,
}

impl GraphElement {
    /// Index of the first sub-shape of the given kind, if any.
    pub fn first_shape(&self, kind: ShapeKind) -> Option<usize> {
        self.shapes.iter().position(|s| s.kind == kind)
    }

    /// Indices of all sub-shapes of the given kind.
    pub fn shapes_of(&self, kind: ShapeKind) -> Vec<usize> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with(shapes: Vec<Shape>) -> GraphElement {
        GraphElement {
            id: "n1".to_string(),
            kind: ElementKind::ProcessNode,
            metric_key: "n1".to_string(),
            label: "n1".to_string(),
            shapes,
        }
    }

    #[test]
    fn test_first_shape() {
        let e = element_with(vec![
            Shape::new(ShapeKind::Path, None, None),
            Shape::new(ShapeKind::Ellipse, None, None),
            Shape::new(ShapeKind::Ellipse, None, None),
        ]);
        assert_eq!(e.first_shape(ShapeKind::Ellipse), Some(1));
        assert_eq!(e.first_shape(ShapeKind::Polygon), None);
    }

    #[test]
    fn test_shapes_of() {
        let e = element_with(vec![
            Shape::new(ShapeKind::Path, None, None),
            Shape::new(ShapeKind::Polygon, None, None),
            Shape::new(ShapeKind::Path, None, None),
        ]);
        assert_eq!(e.shapes_of(ShapeKind::Path), vec![0, 2]);
        assert_eq!(e.shapes_of(ShapeKind::Polygon), vec![1]);
    }
}
