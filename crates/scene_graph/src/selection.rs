//! The current selection.
//!
//! Marking nodes as selected is done on [`Document`] (the equivalent of a
//! user clicking layers in a design tool). Reading the selection goes
//! through [`Selection`], a read-only view that can be enumerated as often
//! as needed.

use crate::{Document, Result, SceneError};
use node::{Container, Node, NodeId};

pub const NO_LAYERS_SELECTED: &str = "No layers are selected.";
pub const SELECTED_LAYERS_HEADER: &str = "Selected layers:";

impl Document {
    /// Read-only view of the selected nodes, in marking order.
    pub fn selection(&self) -> Selection<'_> {
        Selection {
            document: self,
            ids: &self.selection,
        }
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    /// Marks nodes as selected, after anything already selected.
    ///
    /// Nodes that are already selected keep their position. If any id is
    /// unknown nothing is marked.
    pub fn select(&mut self, ids: impl IntoIterator<Item = NodeId>) -> Result<()> {
        let ids: Vec<NodeId> = ids.into_iter().collect();
        if let Some(missing) = ids.iter().find(|id| !self.contains(**id)) {
            return Err(SceneError::NodeNotFound(*missing));
        }
        for id in ids {
            if !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
        Ok(())
    }

    /// Replaces the selection.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = NodeId>) -> Result<()> {
        let previous = std::mem::take(&mut self.selection);
        if let Err(err) = self.select(ids) {
            self.selection = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Unmarks a node. Returns whether it was selected.
    pub fn deselect(&mut self, id: NodeId) -> bool {
        let before = self.selection.len();
        self.selection.retain(|selected| *selected != id);
        self.selection.len() != before
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects every top-level node of the selected page.
    pub fn select_all(&mut self) -> Result<()> {
        let page = self.selected_page_id()?;
        let ids = self.children(Container::Page(page))?.to_vec();
        self.set_selection(ids)
    }
}

/// Read-only view over the selected nodes.
///
/// The view is `Copy`; every call to [`Selection::iter`] starts a fresh
/// enumeration in marking order.
#[derive(Clone, Copy)]
pub struct Selection<'a> {
    document: &'a Document,
    ids: &'a [NodeId],
}

impl<'a> Selection<'a> {
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &'a [NodeId] {
        self.ids
    }

    pub fn get(&self, index: usize) -> Option<&'a Node> {
        self.ids.get(index).and_then(|id| self.document.node(*id))
    }

    pub fn iter(&self) -> SelectionIter<'a> {
        SelectionIter {
            document: self.document,
            ids: self.ids.iter(),
        }
    }

    /// Calls `f` with the 0-based index and node of every selected node.
    pub fn for_each(&self, mut f: impl FnMut(usize, &'a Node)) {
        for (index, node) in self.iter().enumerate() {
            f(index, node);
        }
    }

    /// Display names of the selected nodes.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(Node::display_name).collect()
    }

    /// The "Selected layers" listing: a header followed by one numbered
    /// line per node, or a single line saying nothing is selected.
    pub fn report_lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec![NO_LAYERS_SELECTED.to_string()];
        }
        let mut lines = Vec::with_capacity(self.count() + 1);
        lines.push(SELECTED_LAYERS_HEADER.to_string());
        self.for_each(|index, node| lines.push(format!("{}. {}", index + 1, node.display_name())));
        lines
    }

    /// Fails with [`SceneError::EmptySelection`] when nothing is selected.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(SceneError::EmptySelection)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids).finish()
    }
}

impl<'a> IntoIterator for Selection<'a> {
    type Item = &'a Node;
    type IntoIter = SelectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over selected nodes in marking order.
pub struct SelectionIter<'a> {
    document: &'a Document,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for SelectionIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        // Destroyed nodes are dropped from the selection, so every id resolves.
        self.ids.next().and_then(|id| self.document.node(*id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for SelectionIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use node::{Frame, ShapeType, Style};

    fn document_with_shapes(names: &[&str]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new("Test");
        let page = doc.selected_page_id().unwrap();
        let ids = names
            .iter()
            .map(|name| {
                let shape = Node::shape(
                    ShapeType::Rectangle,
                    Frame::new(0.0, 0.0, 10.0, 10.0).unwrap(),
                    Style::default(),
                )
                .with_name(*name);
                doc.insert(page, shape).unwrap()
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn empty_selection_enumerates_nothing() {
        let (doc, _) = document_with_shapes(&["A"]);
        let selection = doc.selection();
        assert!(selection.is_empty());
        assert_eq!(selection.count(), 0);

        let mut calls = 0;
        selection.for_each(|_, _| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(selection.ensure_non_empty(), Err(SceneError::EmptySelection));
    }

    #[test]
    fn enumeration_follows_marking_order() {
        let (mut doc, ids) = document_with_shapes(&["A", "B", "C"]);
        doc.select([ids[2], ids[0]]).unwrap();
        doc.select([ids[1], ids[2]]).unwrap();

        let mut seen = Vec::new();
        doc.selection().for_each(|index, node| seen.push((index, node.display_name())));
        assert_eq!(
            seen,
            vec![(0, "C".to_string()), (1, "A".to_string()), (2, "B".to_string())]
        );
    }

    #[test]
    fn enumeration_is_restartable() {
        let (mut doc, ids) = document_with_shapes(&["A", "B"]);
        doc.select(ids.clone()).unwrap();
        let selection = doc.selection();
        assert_eq!(selection.names(), vec!["A", "B"]);
        assert_eq!(selection.names(), vec!["A", "B"]);
        assert_eq!(selection.iter().len(), 2);
        assert_eq!(selection.get(1).unwrap().id, ids[1]);
    }

    #[test]
    fn report_lines_number_from_one() {
        let (mut doc, ids) = document_with_shapes(&["A", "B"]);
        assert_eq!(doc.selection().report_lines(), vec!["No layers are selected."]);

        doc.select(ids).unwrap();
        assert_eq!(
            doc.selection().report_lines(),
            vec!["Selected layers:", "1. A", "2. B"]
        );
    }

    #[test]
    fn selecting_unknown_node_marks_nothing() {
        let (mut doc, ids) = document_with_shapes(&["A"]);
        let missing = NodeId::from_u128(99);
        assert_eq!(doc.select([ids[0], missing]), Err(SceneError::NodeNotFound(missing)));
        assert!(doc.selection().is_empty());

        doc.select([ids[0]]).unwrap();
        assert!(doc.set_selection([missing]).is_err());
        assert_eq!(doc.selection().ids(), &[ids[0]]);
    }

    #[test]
    fn destroyed_nodes_leave_the_selection() {
        let (mut doc, ids) = document_with_shapes(&["A", "B"]);
        doc.select(ids.clone()).unwrap();
        doc.remove(ids[0]).unwrap();
        assert_eq!(doc.selection().ids(), &[ids[1]]);

        let page = doc.selected_page_id().unwrap();
        doc.clear_children(page).unwrap();
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn select_all_takes_top_level_nodes() {
        let (mut doc, ids) = document_with_shapes(&["A", "B"]);
        doc.select_all().unwrap();
        assert_eq!(doc.selection().ids(), ids.as_slice());
        assert!(doc.deselect(ids[0]));
        assert!(!doc.deselect(ids[0]));
        doc.clear_selection();
        assert!(doc.selection().is_empty());
    }
}
