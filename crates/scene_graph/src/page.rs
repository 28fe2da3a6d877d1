use node::{NodeId, PageId};

/// A page of a document.
///
/// The page owns its top-level nodes. Their order is the draw order: the
/// first child is painted first, the last one ends up on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    name: String,
    pub(crate) children: Vec<NodeId>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(PageId::new(), name)
    }

    pub fn with_id(id: PageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Top-level nodes in draw order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
