//! Commands - all operations that modify a document.
//!
//! Commands are intent-based: they describe what should happen, and the
//! executor maps them onto document operations. Containers default to the
//! selected page when omitted, matching how scripts work on "the current
//! page".

use crate::Target;
use glam::DVec2;
use node::{Border, Color, Container, Frame, NodeId, PageId, ShapeType};
use serde::{Deserialize, Serialize};

/// A command that modifies a document.
///
/// Commands are serializable for:
/// - Recording and replaying scripts
/// - The command-line interface
/// - Batching several edits into one message
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Pages ===
    /// Append a page.
    AddPage { name: String },

    /// Make a page the selected page.
    SelectPage { page: PageId },

    /// Rename a page.
    RenamePage { page: PageId, name: String },

    /// Remove a page and everything on it.
    RemovePage { page: PageId },

    // === Creation ===
    /// Create an artboard on a page (default: the selected page).
    CreateArtboard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<PageId>,
        frame: Frame,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Create a shape in a container (default: the selected page).
    CreateShape {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<Container>,
        #[serde(default)]
        shape_type: ShapeType,
        frame: Frame,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fills: Vec<Color>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        borders: Vec<Border>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    // === Structure ===
    /// Destroy every child of a container (default: the selected page).
    ClearChildren {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        container: Option<Container>,
    },

    /// Move a node to the end of another container.
    Reparent { node: NodeId, parent: Container },

    /// Delete target nodes.
    Delete {
        #[serde(default)]
        target: Target,
    },

    // === Selection ===
    /// Select nodes, optionally adding to the existing selection.
    Select {
        target: Target,
        #[serde(default)]
        add_to_selection: bool,
    },

    /// Clear the current selection.
    ClearSelection,

    /// Select every top-level node of the selected page.
    SelectAll,

    // === Geometry ===
    /// Move nodes by a delta.
    Move {
        #[serde(default)]
        target: Target,
        delta: DVec2,
    },

    /// Replace the frame of nodes.
    SetFrame {
        #[serde(default)]
        target: Target,
        frame: Frame,
    },

    // === Style ===
    /// Replace fills and borders of target shapes. Artboards are skipped.
    SetStyle {
        #[serde(default)]
        target: Target,
        #[serde(default)]
        fills: Vec<Color>,
        #[serde(default)]
        borders: Vec<Border>,
    },

    /// Set or clear a node's name.
    Rename {
        node: NodeId,
        #[serde(default)]
        name: Option<String>,
    },

    // === Batch ===
    /// Execute multiple commands in sequence.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of nodes created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<NodeId>,
        /// IDs of nodes modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<NodeId>,
        /// IDs of nodes deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<NodeId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn created(ids: Vec<NodeId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn modified(ids: Vec<NodeId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
            deleted: vec![],
        }
    }

    pub fn deleted(ids: Vec<NodeId>) -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
