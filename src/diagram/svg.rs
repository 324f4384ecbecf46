//! Reading the rendered SVG document.
//!
//! The diagram arrives as the SVG written by the graph layout step.
//! Only the parts the overlay needs are read: `<g>` groups tagged with
//! an `edge` or `node` class, their ids, their drawable sub-shapes with
//! stroke/fill styling, and the `<title>` tooltip the renderer attaches
//! to each group.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use roxmltree::Document;

use super::model::{Shape, ShapeKind};

/// A `<g>` group as found in the document, before classification.
#[derive(Debug, Clone)]
pub struct RawGroup {
    pub id: String,
    pub class: String,
    /// Tooltip text the renderer attached (the `<title>` child).
    pub tooltip: Option<String>,
    pub shapes: Vec<Shape>,
}

/// Read and parse a rendered diagram from a file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<RawGroup>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading diagram {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing diagram {}", path.display()))
}

/// Parse a rendered diagram from SVG text.
pub fn parse(svg: &str) -> Result<Vec<RawGroup>> {
    let doc = Document::parse(svg)?;
    let mut groups = Vec::new();

    for node in doc.descendants().filter(|n| n.has_tag_name("g")) {
        let Some(id) = node.attribute("id") else {
            continue;
        };
        let class = node.attribute("class").unwrap_or_default();
        if !class.starts_with("edge") && !class.starts_with("node") {
            continue;
        }

        let mut tooltip = None;
        let mut shapes = Vec::new();
        for child in node.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                "title" => {
                    tooltip = child.text().map(str::trim).filter(|t| !t.is_empty()).map(String::from)
                }
                "path" => shapes.push(shape_of(ShapeKind::Path, &child)),
                "polygon" => shapes.push(shape_of(ShapeKind::Polygon, &child)),
                "ellipse" => shapes.push(shape_of(ShapeKind::Ellipse, &child)),
                _ => {}
            }
        }

        groups.push(RawGroup {
            id: id.to_string(),
            class: class.to_string(),
            tooltip,
            shapes,
        });
    }

    Ok(groups)
}

fn shape_of(kind: ShapeKind, node: &roxmltree::Node) -> Shape {
    Shape::new(
        kind,
        node.attribute("stroke").map(String::from),
        node.attribute("fill").map(String::from),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_svg() -> &'static str {
        r##"<svg xmlns="http://www.w3.org/2000/svg">
            <g id="graph0" class="graph">
                <g id="p1" class="node">
                    <title>paste</title>
                    <ellipse stroke="black" fill="none" cx="1" cy="2" rx="3" ry="4"/>
                </g>
                <g id="store:out" class="node">
                    <title>out</title>
                    <polygon stroke="black" fill="lightgrey" points="0,0 1,1"/>
                </g>
                <g id="p3" class="edge">
                    <title>paste-&gt;sort</title>
                    <path stroke="black" fill="none" d="M0,0"/>
                    <polygon stroke="black" fill="black" points="0,0 1,1"/>
                </g>
            </g>
        </svg>"##
    }

    #[test]
    fn test_parse_groups() {
        let groups = parse(sample_svg()).unwrap();
        assert_eq!(groups.len(), 3);

        let node = &groups[0];
        assert_eq!(node.id, "p1");
        assert_eq!(node.class, "node");
        assert_eq!(node.tooltip.as_deref(), Some("paste"));
        assert_eq!(node.shapes.len(), 1);
        assert_eq!(node.shapes[0].kind, ShapeKind::Ellipse);
        assert_eq!(node.shapes[0].stroke.as_deref(), Some("black"));
        assert_eq!(node.shapes[0].fill.as_deref(), Some("none"));

        let edge = &groups[2];
        assert_eq!(edge.id, "p3");
        assert_eq!(edge.shapes.len(), 2);
        assert_eq!(edge.shapes[0].kind, ShapeKind::Path);
        assert_eq!(edge.shapes[1].kind, ShapeKind::Polygon);
    }

    #[test]
    fn test_parse_skips_untagged_groups() {
        // The outer "graph" group carries neither edge nor node class.
        let groups = parse(sample_svg()).unwrap();
        assert!(groups.iter().all(|g| g.id != "graph0"));
    }

    #[test]
    fn test_parse_invalid_document() {
        assert!(parse("not an svg").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/diagram.svg").unwrap_err();
        assert!(err.to_string().contains("reading diagram"));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_svg()).unwrap();
        let groups = load(file.path()).unwrap();
        assert_eq!(groups.len(), 3);
    }
}
