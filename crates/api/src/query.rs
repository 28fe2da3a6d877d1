//! Queries - read-only access to document state.
//!
//! Queries allow inspecting a document without modifying it, e.g. to look
//! up the ids of what a script just created before issuing more commands.

use crate::Target;
use glam::DVec2;
use node::{Border, Color, Container, Frame, Node, NodeId, NodeKind, PageId, ShapeType};
use scene_graph::{Document, Page};
use serde::{Deserialize, Serialize};

/// A query for document state (read-only).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get the ids of the current selection.
    GetSelection,

    /// Get the numbered "Selected layers" report lines.
    GetSelectedLayers,

    /// Get all pages, in order.
    GetPages,

    /// Get a specific node by ID.
    GetNode { id: NodeId },

    /// Get nodes matching a target.
    GetNodes {
        #[serde(default)]
        target: Target,
    },

    /// Get the direct children of a container (default: the selected page).
    GetChildren {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<Container>,
    },

    /// Get the number of nodes in the document.
    GetNodeCount,

    /// Get the bounding box of a container's direct children.
    GetBounds {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<Container>,
    },
}

/// Response to a query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    /// Selection result.
    Selection { ids: Vec<NodeId> },

    /// Report lines.
    Lines { lines: Vec<String> },

    /// Pages result.
    Pages { pages: Vec<PageInfo> },

    /// Nodes result.
    Nodes { nodes: Vec<NodeInfo> },

    /// Single node result.
    Node { node: Option<NodeInfo> },

    /// Bounds result. Empty containers have no bounds.
    Bounds {
        min: Option<DVec2>,
        max: Option<DVec2>,
    },

    /// Count result.
    Count { count: usize },

    /// Error result.
    Error { message: String },
}

impl QueryResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Serializable node information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeInfoKind,
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Container>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Color>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub borders: Vec<Border>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

/// Node kind as reported by queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeInfoKind {
    Artboard,
    Shape(ShapeType),
}

impl NodeInfo {
    /// Snapshot a node together with its place in the document.
    pub fn from_document(doc: &Document, node: &Node) -> Self {
        let (kind, fills, borders) = match &node.kind {
            NodeKind::Artboard => (NodeInfoKind::Artboard, Vec::new(), Vec::new()),
            NodeKind::Shape { shape_type, style } => (
                NodeInfoKind::Shape(*shape_type),
                style.fills().to_vec(),
                style.borders().to_vec(),
            ),
        };
        let children = if node.is_artboard() {
            doc.children(node.id).map(<[NodeId]>::to_vec).unwrap_or_default()
        } else {
            Vec::new()
        };

        Self {
            id: node.id,
            name: node.display_name(),
            kind,
            frame: node.frame,
            parent: doc.parent(node.id),
            fills,
            borders,
            children,
        }
    }
}

/// Serializable page information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: PageId,
    pub name: String,
    pub selected: bool,
    pub children: Vec<NodeId>,
}

impl PageInfo {
    pub fn from_page(doc: &Document, page: &Page) -> Self {
        Self {
            id: page.id(),
            name: page.name().to_string(),
            selected: doc.selected_page().map(Page::id) == Some(page.id()),
            children: page.children().to_vec(),
        }
    }
}
