//! Scene Interchange Format
//!
//! KDL-based text format for whole scene documents.
//! Pure data, no expressions - what you see is what's there.
//!
//! # Document Format
//!
//! ```kdl
//! document version="0.1" name="Untitled" {
//!   page "5b0c…" name="Page 1" selected=#true {
//!     artboard "9e1d…" name="My Artboard Name" x=0 y=0 width=400 height=400 {
//!       rectangle "c3a0…" x=53 y=213 width=122 height=122 {
//!         fill "#35E6C9"
//!       }
//!       oval "77f2…" x=253 y=213 width=122 height=122 {
//!         fill "#FF0000"
//!         border "#00FF00" thickness=16
//!       }
//!     }
//!   }
//!   selection {
//!     node "c3a0…"
//!   }
//! }
//! ```
//!
//! Ids are written as full UUIDs so they survive a round trip. Numbers may
//! be written as integers or floats.

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use node::{Border, Color, Container, Frame, Node, NodeId, PageId, ShapeType, Style};
use scene_graph::{Document, SceneError};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const FORMAT_VERSION: &str = "0.1";

const ARTBOARD: &str = "artboard";

/// Error type for interchange operations.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type Result<T, E = InterchangeError> = std::result::Result<T, E>;

/// Serialize a document to a KDL string.
pub fn to_kdl(document: &Document) -> String {
    let mut doc = KdlDocument::new();

    let mut doc_node = KdlNode::new("document");
    doc_node.push(KdlEntry::new_prop("version", FORMAT_VERSION.to_string()));
    doc_node.push(KdlEntry::new_prop("name", document.name().to_string()));

    let selected_page = document.selected_page().map(|page| page.id());
    let children = doc_node.children_mut().get_or_insert_with(KdlDocument::new);
    for page in document.pages() {
        let mut page_node = KdlNode::new("page");
        page_node.push(KdlEntry::new(page.id().to_uuid_string()));
        page_node.push(KdlEntry::new_prop("name", page.name().to_string()));
        if selected_page == Some(page.id()) {
            page_node.push(KdlEntry::new_prop("selected", true));
        }
        push_children(&mut page_node, document, page.children());
        children.nodes_mut().push(page_node);
    }

    let selection = document.selection();
    if !selection.is_empty() {
        let mut selection_node = KdlNode::new("selection");
        let nodes = selection_node.children_mut().get_or_insert_with(KdlDocument::new);
        for id in selection.ids() {
            let mut entry = KdlNode::new("node");
            entry.push(KdlEntry::new(id.to_uuid_string()));
            nodes.nodes_mut().push(entry);
        }
        children.nodes_mut().push(selection_node);
    }

    doc.nodes_mut().push(doc_node);
    doc.to_string()
}

/// Parse a document from a KDL string.
pub fn from_kdl(input: &str) -> Result<Document> {
    let doc: KdlDocument = input
        .parse()
        .map_err(|e| InterchangeError::Parse(format!("{}", e)))?;

    let doc_node = doc
        .get("document")
        .ok_or_else(|| InterchangeError::InvalidStructure("Missing 'document' node".into()))?;

    let version = doc_node
        .get("version")
        .and_then(|v| v.as_string())
        .unwrap_or(FORMAT_VERSION);
    if version != FORMAT_VERSION {
        log::warn!("reading format version {version}, expected {FORMAT_VERSION}");
    }

    let name = doc_node
        .get("name")
        .and_then(|v| v.as_string())
        .unwrap_or("Untitled");
    let mut document = Document::empty(name);

    let mut selected_page = None;
    let mut selection = Vec::new();
    if let Some(children) = doc_node.children() {
        for node in children.nodes() {
            match node.name().value() {
                "page" => {
                    let page = parse_page(node, &mut document)?;
                    if node.get("selected").and_then(|v| v.as_bool()) == Some(true) {
                        selected_page = Some(page);
                    }
                }
                "selection" => selection.extend(parse_selection(node)?),
                other => {
                    return Err(InterchangeError::InvalidStructure(format!(
                        "Unexpected node in document: {}",
                        other
                    )))
                }
            }
        }
    }

    if let Some(page) = selected_page {
        document.select_page(page)?;
    }
    document.set_selection(selection)?;
    log::debug!(
        "loaded document {:?}: {} pages, {} nodes",
        document.name(),
        document.pages().len(),
        document.len()
    );
    Ok(document)
}

/// Write a document to a `.kdl` file.
pub fn save(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_kdl(document))?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Read a document from a `.kdl` file.
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    from_kdl(&input)
}

fn push_children(parent: &mut KdlNode, document: &Document, ids: &[NodeId]) {
    if ids.is_empty() {
        return;
    }
    let children = parent.children_mut().get_or_insert_with(KdlDocument::new);
    for id in ids {
        if let Some(node) = document.node(*id) {
            children.nodes_mut().push(node_to_kdl(document, node));
        }
    }
}

/// Convert a node to a KDL node (recursively includes artboard children).
fn node_to_kdl(document: &Document, node: &Node) -> KdlNode {
    let type_name = match node.shape_type() {
        Some(shape_type) => shape_type.to_string().to_lowercase(),
        None => ARTBOARD.to_string(),
    };
    let mut kdl_node = KdlNode::new(type_name);

    kdl_node.push(KdlEntry::new(node.id.to_uuid_string()));
    if let Some(name) = &node.name {
        kdl_node.push(KdlEntry::new_prop("name", name.clone()));
    }
    kdl_node.push(KdlEntry::new_prop("x", number(node.frame.x())));
    kdl_node.push(KdlEntry::new_prop("y", number(node.frame.y())));
    kdl_node.push(KdlEntry::new_prop("width", number(node.frame.width())));
    kdl_node.push(KdlEntry::new_prop("height", number(node.frame.height())));

    if let Some(style) = node.style() {
        if !style.is_empty() {
            let children = kdl_node.children_mut().get_or_insert_with(KdlDocument::new);
            for fill in style.fills() {
                let mut fill_node = KdlNode::new("fill");
                fill_node.push(KdlEntry::new(fill.as_str().to_string()));
                children.nodes_mut().push(fill_node);
            }
            for border in style.borders() {
                let mut border_node = KdlNode::new("border");
                border_node.push(KdlEntry::new(border.color().as_str().to_string()));
                border_node.push(KdlEntry::new_prop("thickness", number(border.thickness())));
                children.nodes_mut().push(border_node);
            }
        }
    }

    if node.is_artboard() {
        if let Ok(children) = document.children(node.id) {
            push_children(&mut kdl_node, document, children);
        }
    }

    kdl_node
}

/// Whole numbers are written without a fractional part.
fn number(value: f64) -> KdlValue {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        KdlValue::Integer(value as i128)
    } else {
        KdlValue::Float(value)
    }
}

fn parse_page(node: &KdlNode, document: &mut Document) -> Result<PageId> {
    let id = match first_argument(node) {
        Some(id) => parse_id::<PageId>(id)?,
        None => PageId::new(),
    };
    let name = node
        .get("name")
        .and_then(|v| v.as_string())
        .ok_or_else(|| InterchangeError::MissingField(format!("page {id} name")))?;
    document.add_page_with_id(id, name)?;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            parse_node_recursive(child, Container::Page(id), document)?;
        }
    }
    Ok(id)
}

/// Parse an artboard or shape node and insert it, then its children.
fn parse_node_recursive(node: &KdlNode, parent: Container, document: &mut Document) -> Result<NodeId> {
    let type_name = node.name().value();
    let frame = parse_frame(node)?;

    let mut parsed = if type_name == ARTBOARD {
        Node::artboard(frame)
    } else {
        let shape_type = ShapeType::from_str(type_name).map_err(|_| {
            InterchangeError::InvalidValue(format!("Unknown node type: {}", type_name))
        })?;
        Node::shape(shape_type, frame, parse_style(node)?)
    };

    if let Some(id) = first_argument(node) {
        parsed = parsed.with_id(parse_id::<NodeId>(id)?);
    }
    parsed.name = node.get("name").and_then(|v| v.as_string()).map(str::to_string);

    let id = document.insert(parent, parsed)?;

    if type_name == ARTBOARD {
        if let Some(children) = node.children() {
            for child in children.nodes() {
                parse_node_recursive(child, Container::Artboard(id), document)?;
            }
        }
    }
    Ok(id)
}

fn parse_frame(node: &KdlNode) -> Result<Frame> {
    let x = get_number(node, "x")?.unwrap_or(0.0);
    let y = get_number(node, "y")?.unwrap_or(0.0);
    let width = get_number(node, "width")?
        .ok_or_else(|| InterchangeError::MissingField(format!("{} width", node.name().value())))?;
    let height = get_number(node, "height")?
        .ok_or_else(|| InterchangeError::MissingField(format!("{} height", node.name().value())))?;
    Frame::new(x, y, width, height).map_err(|e| InterchangeError::InvalidValue(e.to_string()))
}

fn parse_style(node: &KdlNode) -> Result<Style> {
    let mut style = Style::default();
    let Some(children) = node.children() else {
        return Ok(style);
    };

    for child in children.nodes() {
        match child.name().value() {
            "fill" => style = style.with_fill(parse_color(child)?),
            "border" => {
                let thickness = get_number(child, "thickness")?.unwrap_or(1.0);
                let border = Border::new(parse_color(child)?, thickness)
                    .map_err(|e| InterchangeError::InvalidValue(e.to_string()))?;
                style = style.with_border(border);
            }
            other => {
                return Err(InterchangeError::InvalidStructure(format!(
                    "Unexpected node in shape: {}",
                    other
                )))
            }
        }
    }
    Ok(style)
}

fn parse_color(node: &KdlNode) -> Result<Color> {
    let value = first_argument(node).ok_or_else(|| {
        InterchangeError::MissingField(format!("{} color", node.name().value()))
    })?;
    Color::parse(value).map_err(|e| InterchangeError::InvalidValue(e.to_string()))
}

fn parse_selection(node: &KdlNode) -> Result<Vec<NodeId>> {
    let Some(children) = node.children() else {
        return Ok(Vec::new());
    };
    children
        .nodes()
        .iter()
        .map(|child| {
            let id = first_argument(child)
                .ok_or_else(|| InterchangeError::MissingField("selection node id".into()))?;
            parse_id(id)
        })
        .collect()
}

fn parse_id<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| InterchangeError::InvalidValue(format!("Bad id {:?}: {}", value, e)))
}

fn first_argument(node: &KdlNode) -> Option<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
}

fn get_number(node: &KdlNode, name: &str) -> Result<Option<f64>> {
    let Some(value) = node.get(name) else {
        return Ok(None);
    };
    value
        .as_float()
        .or_else(|| value.as_integer().map(|v| v as f64))
        .map(Some)
        .ok_or_else(|| {
            InterchangeError::InvalidValue(format!(
                "{} {} must be a number",
                node.name().value(),
                name
            ))
        })
}
