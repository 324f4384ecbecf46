//! One-time classification of diagram elements.
//!
//! Partitions the rendered groups into pipes, stores and processes,
//! resolves each element's metric key, and strips the renderer tooltip
//! (it would fight with the metric popup; its text is kept as the
//! element label instead).

use tracing::debug;

use super::model::{ElementKind, GraphElement, STORE_PREFIX};
use super::svg::RawGroup;

/// The result of classifying a rendered diagram.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// All classified elements, in document order.
    pub elements: Vec<GraphElement>,
    /// Ids of process nodes, for immediate identity prefetch.
    pub process_ids: Vec<String>,
}

impl Classified {
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }
}

/// Classify rendered groups into graph elements.
///
/// An `edge`-classed group is a pipe. A `node`-classed group whose id
/// carries the reserved `store:` prefix is a store, with the prefix
/// stripped from its metric key; every other node is a process.
pub fn classify(groups: Vec<RawGroup>) -> Classified {
    let mut classified = Classified::default();

    for mut group in groups {
        let kind = if group.class.starts_with("edge") {
            ElementKind::PipeEdge
        } else if group.id.starts_with(STORE_PREFIX) {
            ElementKind::StoreNode
        } else {
            ElementKind::ProcessNode
        };

        let metric_key = match kind {
            ElementKind::StoreNode => group.id[STORE_PREFIX.len()..].to_string(),
            _ => group.id.clone(),
        };

        // Strip the renderer tooltip; reuse its text as the label.
        let label = group.tooltip.take().unwrap_or_else(|| group.id.clone());

        if kind == ElementKind::ProcessNode {
            debug!(id = %group.id, "classified process node, identity wanted");
            classified.process_ids.push(group.id.clone());
        }

        classified.elements.push(GraphElement {
            id: group.id,
            kind,
            metric_key,
            label,
            shapes: group.shapes,
        });
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::model::{Shape, ShapeKind};

    fn group(id: &str, class: &str, tooltip: Option<&str>) -> RawGroup {
        RawGroup {
            id: id.to_string(),
            class: class.to_string(),
            tooltip: tooltip.map(String::from),
            shapes: vec![Shape::new(ShapeKind::Ellipse, Some("black".into()), None)],
        }
    }

    #[test]
    fn test_partition_by_kind() {
        let classified = classify(vec![
            group("p3", "edge", None),
            group("store:out", "node", None),
            group("n1", "node", None),
        ]);

        let kinds: Vec<ElementKind> = classified.elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::PipeEdge,
                ElementKind::StoreNode,
                ElementKind::ProcessNode
            ]
        );
        assert_eq!(classified.count_of(ElementKind::PipeEdge), 1);
    }

    #[test]
    fn test_store_prefix_stripped_for_metric_key() {
        let classified = classify(vec![group("store:out", "node", None)]);
        let store = &classified.elements[0];
        assert_eq!(store.id, "store:out");
        assert_eq!(store.metric_key, "out");
    }

    #[test]
    fn test_edge_metric_key_is_id() {
        let classified = classify(vec![group("p3", "edge", None)]);
        assert_eq!(classified.elements[0].metric_key, "p3");
    }

    #[test]
    fn test_process_ids_collected_for_prefetch() {
        let classified = classify(vec![
            group("n1", "node", None),
            group("store:out", "node", None),
            group("n2", "node", None),
            group("e1", "edge", None),
        ]);
        assert_eq!(classified.process_ids, vec!["n1", "n2"]);
    }

    #[test]
    fn test_tooltip_stripped_into_label() {
        let classified = classify(vec![group("n1", "node", Some("paste"))]);
        let element = &classified.elements[0];
        assert_eq!(element.label, "paste");
    }

    #[test]
    fn test_missing_tooltip_falls_back_to_id() {
        let classified = classify(vec![group("n1", "node", None)]);
        assert_eq!(classified.elements[0].label, "n1");
    }

    #[test]
    fn test_empty_diagram_is_a_noop() {
        let classified = classify(Vec::new());
        assert!(classified.elements.is_empty());
        assert!(classified.process_ids.is_empty());
    }
}
