//! Target specification for commands.
//!
//! Commands need to specify which nodes they operate on.
//! This module defines flexible targeting that works with
//! the current selection, specific IDs, or queries.

use node::{Container, NodeId, ShapeType};
use serde::{Deserialize, Serialize};

/// Specifies which nodes a command targets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The current selection (most common for user actions).
    #[default]
    Selection,

    /// Specific node by ID.
    Node(NodeId),

    /// Multiple specific nodes by ID.
    Nodes(Vec<NodeId>),

    /// Every node on the selected page, depth first.
    All,

    /// Nodes matching a query.
    Query(NodeQuery),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Vec<NodeId>> for Target {
    fn from(ids: Vec<NodeId>) -> Self {
        Self::Nodes(ids)
    }
}

/// Query to find nodes by properties. Queries search every page.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeQuery {
    /// Nodes with exactly this name.
    ByName(String),

    /// Shapes of a specific type.
    ByShapeType(ShapeType),

    /// All artboards.
    Artboards,

    /// Direct children of a page or artboard.
    ChildrenOf(Container),
}
