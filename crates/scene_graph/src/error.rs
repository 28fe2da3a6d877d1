use node::{NodeError, NodeId, PageId};
use thiserror::Error;

/// Errors raised by document and tree operations.
///
/// Every error is reported by the call that violated the constraint, and
/// a failed call leaves the document unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("moving {node} into {parent} would create a cycle")]
    CycleError { node: NodeId, parent: NodeId },

    /// Informational: nothing is selected.
    #[error("no layers are selected")]
    EmptySelection,

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("page {0} not found")]
    PageNotFound(PageId),

    #[error("document has no selected page")]
    NoSelectedPage,

    #[error("node {0} is not an artboard and cannot hold children")]
    NotAContainer(NodeId),

    #[error("artboard {0} cannot be placed inside another artboard")]
    NestedArtboard(NodeId),

    #[error("node {0} is not a shape")]
    NotAShape(NodeId),

    #[error("node {0} already exists in this document")]
    DuplicateNode(NodeId),

    #[error("page {0} already exists in this document")]
    DuplicatePage(PageId),
}
