//! # Scene Graph
//!
//! The scene graph owns the node hierarchy of a document:
//!
//! ```text
//! Document
//! └── Page            (ordered, at most one selected)
//!     ├── Artboard    (ordered children, draw order)
//!     │   └── Shape
//!     └── Shape       (loose shapes live directly on a page)
//! ```
//!
//! Nodes are stored in a slot map and addressed from outside by their
//! stable [`NodeId`]. The graph keeps the parent/children links consistent:
//! every node has exactly one container, creation attaches in the same step
//! and destruction only happens by removing a node from its container.
//!
//! All state is owned by an explicit [`Document`] value, so any number of
//! documents can coexist.

mod error;
mod page;
mod selection;

pub use error::SceneError;
pub use page::Page;
pub use selection::{Selection, SelectionIter, NO_LAYERS_SELECTED, SELECTED_LAYERS_HEADER};

use glam::DVec2;
use node::{Container, Frame, Node, NodeId, PageId, ShapeType, Style};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Name given to the page of a new document.
pub const DEFAULT_PAGE_NAME: &str = "Page 1";

pub type Result<T, E = SceneError> = std::result::Result<T, E>;

slotmap::new_key_type! {
    /// Storage key for nodes within a document.
    struct SceneNodeKey;
}

/// A node together with its position in the hierarchy.
#[derive(Debug)]
struct SceneNode {
    /// The container owning this node.
    parent: Container,
    /// Child ids in draw order. Always empty for shapes.
    children: Vec<NodeId>,
    node: Node,
}

/// A document: pages, their node trees and the current selection.
#[derive(Debug)]
pub struct Document {
    name: String,
    pages: Vec<Page>,
    selected_page: Option<PageId>,
    nodes: SlotMap<SceneNodeKey, SceneNode>,
    node_mapping: HashMap<NodeId, SceneNodeKey>,
    /// Selected node ids in marking order.
    selection: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Document {
    /// Creates a document with a single selected page, like a fresh
    /// document in a design tool.
    pub fn new(name: impl Into<String>) -> Self {
        let mut document = Self::empty(name);
        document.add_page(DEFAULT_PAGE_NAME);
        document
    }

    /// Creates a document without any pages.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
            selected_page: None,
            nodes: SlotMap::with_key(),
            node_mapping: HashMap::new(),
            selection: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // === Pages ===

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id() == id)
    }

    /// Appends a new page. It becomes the selected page if none is selected.
    pub fn add_page(&mut self, name: impl Into<String>) -> PageId {
        let page = Page::new(name);
        let id = page.id();
        self.push_page(page);
        id
    }

    /// Appends an empty page with a caller-chosen id.
    pub fn add_page_with_id(&mut self, id: PageId, name: impl Into<String>) -> Result<PageId> {
        if self.page(id).is_some() {
            return Err(SceneError::DuplicatePage(id));
        }
        self.push_page(Page::with_id(id, name));
        Ok(id)
    }

    fn push_page(&mut self, page: Page) {
        log::debug!("adding page {} ({:?})", page.id(), page.name());
        if self.selected_page.is_none() {
            self.selected_page = Some(page.id());
        }
        self.pages.push(page);
    }

    pub fn rename_page(&mut self, id: PageId, name: impl Into<String>) -> Result<()> {
        let page = self
            .pages
            .iter_mut()
            .find(|page| page.id() == id)
            .ok_or(SceneError::PageNotFound(id))?;
        page.set_name(name.into());
        Ok(())
    }

    /// Removes a page and destroys everything on it.
    ///
    /// If the page was selected, the first remaining page becomes selected.
    /// Returns the ids of all destroyed nodes.
    pub fn remove_page(&mut self, id: PageId) -> Result<Vec<NodeId>> {
        let destroyed = self.clear_children(Container::Page(id))?;
        self.pages.retain(|page| page.id() != id);
        if self.selected_page == Some(id) {
            self.selected_page = self.pages.first().map(Page::id);
        }
        log::debug!("removed page {id}");
        Ok(destroyed)
    }

    pub fn select_page(&mut self, id: PageId) -> Result<()> {
        if self.page(id).is_none() {
            return Err(SceneError::PageNotFound(id));
        }
        self.selected_page = Some(id);
        Ok(())
    }

    pub fn selected_page(&self) -> Option<&Page> {
        self.selected_page.and_then(|id| self.page(id))
    }

    pub fn selected_page_id(&self) -> Result<PageId> {
        self.selected_page.ok_or(SceneError::NoSelectedPage)
    }

    // === Node creation ===

    /// Attaches a node to the end of `parent`'s children.
    ///
    /// The node keeps its id, which must not already exist in this document.
    pub fn insert(&mut self, parent: impl Into<Container>, node: Node) -> Result<NodeId> {
        let parent = parent.into();
        if self.node_mapping.contains_key(&node.id) {
            return Err(SceneError::DuplicateNode(node.id));
        }
        self.check_attach(parent, node.id, node.is_artboard())?;

        let id = node.id;
        log::debug!("inserting {} {id} into {parent:?}", node.display_name());
        let key = self.nodes.insert(SceneNode {
            parent,
            children: Vec::new(),
            node,
        });
        self.node_mapping.insert(id, key);
        self.children_mut(parent)?.push(id);
        Ok(id)
    }

    /// Appends a new artboard to a page.
    pub fn create_artboard(&mut self, page: PageId, frame: Frame, name: Option<&str>) -> Result<NodeId> {
        let mut artboard = Node::artboard(frame);
        artboard.name = name.map(str::to_string);
        self.insert(Container::Page(page), artboard)
    }

    /// Appends a new shape to an artboard or page.
    pub fn create_shape(
        &mut self,
        parent: impl Into<Container>,
        frame: Frame,
        shape_type: ShapeType,
        style: Style,
    ) -> Result<NodeId> {
        self.insert(parent, Node::shape(shape_type, frame, style))
    }

    // === Node destruction ===

    /// Destroys all children of a container, including their subtrees.
    ///
    /// Returns the ids of every destroyed node.
    pub fn clear_children(&mut self, container: impl Into<Container>) -> Result<Vec<NodeId>> {
        let container = container.into();
        let children = std::mem::take(self.children_mut(container)?);
        let mut destroyed = Vec::new();
        for child in children {
            self.destroy(child, &mut destroyed);
        }
        log::debug!("cleared {container:?}: {} nodes destroyed", destroyed.len());
        Ok(destroyed)
    }

    /// Removes a node from its container and destroys its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let parent = self.scene_node(id)?.parent;
        self.children_mut(parent)?.retain(|child| *child != id);
        let mut destroyed = Vec::new();
        self.destroy(id, &mut destroyed);
        log::debug!("removed {id}: {} nodes destroyed", destroyed.len());
        Ok(destroyed)
    }

    /// Drops a node and its subtree from storage and from the selection.
    /// The caller is responsible for unlinking it from its parent.
    fn destroy(&mut self, id: NodeId, destroyed: &mut Vec<NodeId>) {
        let Some(key) = self.node_mapping.remove(&id) else {
            return;
        };
        let Some(scene_node) = self.nodes.remove(key) else {
            return;
        };
        self.selection.retain(|selected| *selected != id);
        destroyed.push(id);
        for child in scene_node.children {
            self.destroy(child, destroyed);
        }
    }

    // === Hierarchy ===

    /// Moves a node to the end of another container's children.
    ///
    /// Fails with [`SceneError::CycleError`] if `new_parent` is the node
    /// itself or one of its descendants. On failure nothing changes.
    pub fn reparent(&mut self, id: NodeId, new_parent: impl Into<Container>) -> Result<()> {
        let new_parent = new_parent.into();
        let scene_node = self.scene_node(id)?;
        let old_parent = scene_node.parent;
        let is_artboard = scene_node.node.is_artboard();

        if let Container::Artboard(target) = new_parent {
            if !self.contains(target) {
                return Err(SceneError::NodeNotFound(target));
            }
            if target == id || self.is_ancestor(id, target) {
                return Err(SceneError::CycleError {
                    node: id,
                    parent: target,
                });
            }
        }
        self.check_attach(new_parent, id, is_artboard)?;

        self.children_mut(old_parent)?.retain(|child| *child != id);
        self.children_mut(new_parent)?.push(id);
        self.scene_node_mut(id)?.parent = new_parent;
        log::debug!("moved {id} from {old_parent:?} to {new_parent:?}");
        Ok(())
    }

    /// Returns true if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(Container::Artboard(parent)) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Validates that a node may be attached to `parent`.
    fn check_attach(&self, parent: Container, id: NodeId, is_artboard: bool) -> Result<()> {
        match parent {
            Container::Page(page) => {
                if self.page(page).is_none() {
                    return Err(SceneError::PageNotFound(page));
                }
            }
            Container::Artboard(target) => {
                if !self.scene_node(target)?.node.is_artboard() {
                    return Err(SceneError::NotAContainer(target));
                }
                if is_artboard {
                    return Err(SceneError::NestedArtboard(id));
                }
            }
        }
        Ok(())
    }

    // === Lookup ===

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.scene_node(id).ok().map(|scene_node| &scene_node.node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_mapping.contains_key(&id)
    }

    pub fn parent(&self, id: NodeId) -> Option<Container> {
        self.scene_node(id).ok().map(|scene_node| scene_node.parent)
    }

    /// Child ids of a container in draw order.
    pub fn children(&self, container: impl Into<Container>) -> Result<&[NodeId]> {
        match container.into() {
            Container::Page(page) => self
                .page(page)
                .map(Page::children)
                .ok_or(SceneError::PageNotFound(page)),
            Container::Artboard(id) => {
                let scene_node = self.scene_node(id)?;
                if !scene_node.node.is_artboard() {
                    return Err(SceneError::NotAContainer(id));
                }
                Ok(&scene_node.children)
            }
        }
    }

    /// Child nodes of a container in draw order.
    pub fn child_nodes(&self, container: impl Into<Container>) -> Result<Vec<&Node>> {
        Ok(self
            .children(container)?
            .iter()
            .filter_map(|id| self.node(*id))
            .collect())
    }

    /// All nodes below a container, depth first, in draw order.
    pub fn descendants(&self, container: impl Into<Container>) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        for child in self.children(container)? {
            self.collect_subtree(*child, &mut out);
        }
        Ok(out)
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        if let Ok(scene_node) = self.scene_node(id) {
            for child in &scene_node.children {
                self.collect_subtree(*child, out);
            }
        }
    }

    /// The page a node lives on.
    pub fn page_of(&self, id: NodeId) -> Option<PageId> {
        let mut current = self.parent(id)?;
        loop {
            match current {
                Container::Page(page) => return Some(page),
                Container::Artboard(parent) => current = self.parent(parent)?,
            }
        }
    }

    /// Ids of all nodes with the given name, in page then draw order.
    pub fn find_by_name(&self, name: &str) -> Vec<NodeId> {
        self.pages
            .iter()
            .flat_map(|page| self.descendants(Container::Page(page.id())).unwrap_or_default())
            .filter(|id| self.node(*id).and_then(|n| n.name.as_deref()) == Some(name))
            .collect()
    }

    /// Number of nodes across all pages.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Node properties ===

    pub fn set_node_name(&mut self, id: NodeId, name: Option<String>) -> Result<()> {
        self.scene_node_mut(id)?.node.name = name;
        Ok(())
    }

    pub fn set_frame(&mut self, id: NodeId, frame: Frame) -> Result<()> {
        self.scene_node_mut(id)?.node.frame = frame;
        Ok(())
    }

    /// Moves a node by `delta` within its container.
    pub fn translate(&mut self, id: NodeId, delta: DVec2) -> Result<()> {
        let scene_node = self.scene_node_mut(id)?;
        scene_node.node.frame = scene_node.node.frame.translate(delta)?;
        Ok(())
    }

    /// Replaces the style of a shape.
    pub fn set_style(&mut self, id: NodeId, new_style: Style) -> Result<()> {
        match &mut self.scene_node_mut(id)?.node.kind {
            node::NodeKind::Shape { style, .. } => {
                *style = new_style;
                Ok(())
            }
            node::NodeKind::Artboard => Err(SceneError::NotAShape(id)),
        }
    }

    // === Internal access ===

    fn scene_node(&self, id: NodeId) -> Result<&SceneNode> {
        self.node_mapping
            .get(&id)
            .and_then(|key| self.nodes.get(*key))
            .ok_or(SceneError::NodeNotFound(id))
    }

    fn scene_node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.node_mapping
            .get(&id)
            .and_then(|key| self.nodes.get_mut(*key))
            .ok_or(SceneError::NodeNotFound(id))
    }

    fn children_mut(&mut self, container: Container) -> Result<&mut Vec<NodeId>> {
        match container {
            Container::Page(page) => self
                .pages
                .iter_mut()
                .find(|p| p.id() == page)
                .map(|p| &mut p.children)
                .ok_or(SceneError::PageNotFound(page)),
            Container::Artboard(id) => {
                let scene_node = self.scene_node_mut(id)?;
                if !scene_node.node.is_artboard() {
                    return Err(SceneError::NotAContainer(id));
                }
                Ok(&mut scene_node.children)
            }
        }
    }
}
