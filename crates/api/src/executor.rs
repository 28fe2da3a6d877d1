//! Command and query execution against a Document.
//!
//! This module connects the abstract Command/Query types to the actual
//! document operations, executing them and returning results.

use crate::{
    Command, CommandResult, NodeInfo, NodeQuery, PageInfo, Query, QueryResult, Target,
};
use node::{Container, Frame, Node, NodeId, Style};
use scene_graph::{Document, SceneError};

type Result<T> = std::result::Result<T, SceneError>;

/// Execute a command against a document.
///
/// Failures are reported as [`CommandResult::Error`]; a failed command
/// leaves the document as it was before that command.
pub fn execute_command(doc: &mut Document, command: Command) -> CommandResult {
    match execute_command_inner(doc, command) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("command rejected: {err}");
            CommandResult::error(err.to_string())
        }
    }
}

fn execute_command_inner(doc: &mut Document, command: Command) -> Result<CommandResult> {
    match command {
        Command::AddPage { name } => {
            doc.add_page(name);
            Ok(CommandResult::success())
        }

        Command::SelectPage { page } => {
            doc.select_page(page)?;
            Ok(CommandResult::success())
        }

        Command::RenamePage { page, name } => {
            doc.rename_page(page, name)?;
            Ok(CommandResult::success())
        }

        Command::RemovePage { page } => Ok(CommandResult::deleted(doc.remove_page(page)?)),

        Command::CreateArtboard { page, frame, name } => {
            let page = match page {
                Some(page) => page,
                None => doc.selected_page_id()?,
            };
            let id = doc.create_artboard(page, frame, name.as_deref())?;
            Ok(CommandResult::created(vec![id]))
        }

        Command::CreateShape {
            parent,
            shape_type,
            frame,
            fills,
            borders,
            name,
        } => {
            let parent = container_or_selected_page(doc, parent)?;
            let mut shape = Node::shape(shape_type, frame, Style::new(fills, borders));
            shape.name = name;
            let id = doc.insert(parent, shape)?;
            Ok(CommandResult::created(vec![id]))
        }

        Command::ClearChildren { container } => {
            let container = container_or_selected_page(doc, container)?;
            Ok(CommandResult::deleted(doc.clear_children(container)?))
        }

        Command::Reparent { node, parent } => {
            doc.reparent(node, parent)?;
            Ok(CommandResult::modified(vec![node]))
        }

        Command::Delete { target } => {
            let Some(ids) = resolve_existing(doc, &target)? else {
                return Ok(CommandResult::success());
            };
            let mut deleted = Vec::new();
            for id in ids {
                // Already destroyed along with an ancestor earlier in the list.
                if !doc.contains(id) {
                    continue;
                }
                deleted.extend(doc.remove(id)?);
            }
            Ok(CommandResult::deleted(deleted))
        }

        Command::Select {
            target,
            add_to_selection,
        } => {
            let ids = resolve_target(doc, &target)?;
            if add_to_selection {
                doc.select(ids)?;
            } else {
                doc.set_selection(ids)?;
            }
            Ok(CommandResult::success())
        }

        Command::ClearSelection => {
            doc.clear_selection();
            Ok(CommandResult::success())
        }

        Command::SelectAll => {
            doc.select_all()?;
            Ok(CommandResult::success())
        }

        Command::Move { target, delta } => {
            let Some(ids) = resolve_existing(doc, &target)? else {
                return Ok(CommandResult::success());
            };
            let ids = outermost(doc, ids);
            let moved = ids
                .iter()
                .map(|id| frame_of(doc, *id).and_then(|frame| Ok(frame.translate(delta)?)))
                .collect::<Result<Vec<Frame>>>()?;
            for (id, frame) in ids.iter().zip(moved) {
                doc.set_frame(*id, frame)?;
            }
            Ok(CommandResult::modified(ids))
        }

        Command::SetFrame { target, frame } => {
            let Some(ids) = resolve_existing(doc, &target)? else {
                return Ok(CommandResult::success());
            };
            let ids = outermost(doc, ids);
            for id in &ids {
                doc.set_frame(*id, frame)?;
            }
            Ok(CommandResult::modified(ids))
        }

        Command::SetStyle {
            target,
            fills,
            borders,
        } => {
            let Some(ids) = resolve_existing(doc, &target)? else {
                return Ok(CommandResult::success());
            };
            let style = Style::new(fills, borders);
            let mut modified = Vec::new();
            for id in ids {
                if doc.node(id).is_some_and(Node::is_artboard) {
                    continue;
                }
                doc.set_style(id, style.clone())?;
                modified.push(id);
            }
            Ok(CommandResult::modified(modified))
        }

        Command::Rename { node, name } => {
            doc.set_node_name(node, name)?;
            Ok(CommandResult::modified(vec![node]))
        }

        Command::Batch { commands } => {
            let mut all_created = Vec::new();
            let mut all_modified = Vec::new();
            let mut all_deleted = Vec::new();

            for cmd in commands {
                match execute_command(doc, cmd) {
                    CommandResult::Success {
                        created,
                        modified,
                        deleted,
                    } => {
                        all_created.extend(created);
                        all_modified.extend(modified);
                        all_deleted.extend(deleted);
                    }
                    CommandResult::Error { message } => {
                        return Ok(CommandResult::error(format!("Batch failed: {}", message)));
                    }
                }
            }

            Ok(CommandResult::Success {
                created: all_created,
                modified: all_modified,
                deleted: all_deleted,
            })
        }
    }
}

/// Execute a query against a document.
pub fn execute_query(doc: &Document, query: Query) -> QueryResult {
    match execute_query_inner(doc, query) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("query rejected: {err}");
            QueryResult::error(err.to_string())
        }
    }
}

fn execute_query_inner(doc: &Document, query: Query) -> Result<QueryResult> {
    match query {
        Query::GetSelection => Ok(QueryResult::Selection {
            ids: doc.selection().ids().to_vec(),
        }),

        Query::GetSelectedLayers => Ok(QueryResult::Lines {
            lines: doc.selection().report_lines(),
        }),

        Query::GetPages => Ok(QueryResult::Pages {
            pages: doc
                .pages()
                .iter()
                .map(|page| PageInfo::from_page(doc, page))
                .collect(),
        }),

        Query::GetNode { id } => Ok(QueryResult::Node {
            node: doc.node(id).map(|node| NodeInfo::from_document(doc, node)),
        }),

        Query::GetNodes { target } => {
            let ids = resolve_target(doc, &target)?;
            Ok(QueryResult::Nodes {
                nodes: node_infos(doc, &ids),
            })
        }

        Query::GetChildren { container } => {
            let container = container_or_selected_page(doc, container)?;
            let ids = doc.children(container)?;
            Ok(QueryResult::Nodes {
                nodes: node_infos(doc, ids),
            })
        }

        Query::GetNodeCount => Ok(QueryResult::Count { count: doc.len() }),

        Query::GetBounds { container } => {
            let container = container_or_selected_page(doc, container)?;
            let bounds = doc
                .child_nodes(container)?
                .into_iter()
                .map(|node| node.frame)
                .reduce(|acc, frame| acc.union(&frame));

            Ok(QueryResult::Bounds {
                min: bounds.map(|frame| frame.origin()),
                max: bounds.map(|frame| frame.max()),
            })
        }
    }
}

fn container_or_selected_page(doc: &Document, container: Option<Container>) -> Result<Container> {
    match container {
        Some(container) => Ok(container),
        None => Ok(Container::Page(doc.selected_page_id()?)),
    }
}

fn frame_of(doc: &Document, id: NodeId) -> Result<Frame> {
    doc.node(id)
        .map(|node| node.frame)
        .ok_or(SceneError::NodeNotFound(id))
}

/// Drops ids whose ancestor is also in `ids`.
///
/// Frames are relative to the parent, so a child already follows its
/// ancestor and must not be positioned a second time.
fn outermost(doc: &Document, ids: Vec<NodeId>) -> Vec<NodeId> {
    ids.iter()
        .copied()
        .filter(|id| !ids.iter().any(|other| doc.is_ancestor(*other, *id)))
        .collect()
}

fn node_infos(doc: &Document, ids: &[NodeId]) -> Vec<NodeInfo> {
    ids.iter()
        .filter_map(|id| doc.node(*id))
        .map(|node| NodeInfo::from_document(doc, node))
        .collect()
}

/// Resolve a target for a mutating command, checking every id exists.
///
/// Returns `None` when the target is an empty selection, which is not an
/// error: there is simply nothing to act on.
fn resolve_existing(doc: &Document, target: &Target) -> Result<Option<Vec<NodeId>>> {
    if matches!(target, Target::Selection) && doc.selection().is_empty() {
        log::info!("{}", SceneError::EmptySelection);
        return Ok(None);
    }
    let ids = resolve_target(doc, target)?;
    if let Some(missing) = ids.iter().find(|id| !doc.contains(**id)) {
        return Err(SceneError::NodeNotFound(*missing));
    }
    Ok(Some(ids))
}

/// Resolve a target to a list of node IDs.
fn resolve_target(doc: &Document, target: &Target) -> Result<Vec<NodeId>> {
    match target {
        Target::Selection => Ok(doc.selection().ids().to_vec()),
        Target::Node(id) => Ok(vec![*id]),
        Target::Nodes(ids) => Ok(ids.clone()),
        Target::All => doc.descendants(doc.selected_page_id()?),
        Target::Query(query) => resolve_node_query(doc, query),
    }
}

/// Resolve a node query to matching IDs, searching every page.
fn resolve_node_query(doc: &Document, query: &NodeQuery) -> Result<Vec<NodeId>> {
    match query {
        NodeQuery::ByName(name) => Ok(doc.find_by_name(name)),
        NodeQuery::ByShapeType(shape_type) => Ok(all_nodes(doc)
            .into_iter()
            .filter(|id| doc.node(*id).and_then(Node::shape_type) == Some(*shape_type))
            .collect()),
        NodeQuery::Artboards => Ok(all_nodes(doc)
            .into_iter()
            .filter(|id| doc.node(*id).is_some_and(Node::is_artboard))
            .collect()),
        NodeQuery::ChildrenOf(container) => Ok(doc.children(*container)?.to_vec()),
    }
}

fn all_nodes(doc: &Document) -> Vec<NodeId> {
    doc.pages()
        .iter()
        .flat_map(|page| doc.descendants(page.id()).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeInfoKind;
    use glam::DVec2;
    use node::{Border, Color, ShapeType};

    fn frame(x: f64, y: f64, w: f64, h: f64) -> Frame {
        Frame::new(x, y, w, h).unwrap()
    }

    fn created_id(result: CommandResult) -> NodeId {
        match result {
            CommandResult::Success { created, .. } => created[0],
            CommandResult::Error { message } => panic!("command failed: {message}"),
        }
    }

    fn create_square(doc: &mut Document, parent: Option<Container>, name: &str, fill: &str) -> NodeId {
        created_id(execute_command(
            doc,
            Command::CreateShape {
                parent,
                shape_type: ShapeType::Rectangle,
                frame: frame(53.0, 213.0, 122.0, 122.0),
                fills: vec![Color::parse(fill).unwrap()],
                borders: vec![],
                name: Some(name.to_string()),
            },
        ))
    }

    fn artboard_with_squares() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new("Exec");
        let artboard = created_id(execute_command(
            &mut doc,
            Command::CreateArtboard {
                page: None,
                frame: frame(0.0, 0.0, 400.0, 400.0),
                name: Some("My Artboard Name".to_string()),
            },
        ));
        let parent = Some(Container::Artboard(artboard));
        let a = create_square(&mut doc, parent, "square1", "#35E6C9");
        let b = create_square(&mut doc, parent, "square2", "#d5ffb3");
        (doc, artboard, a, b)
    }

    #[test]
    fn create_commands_build_the_tree() {
        let (doc, artboard, a, b) = artboard_with_squares();
        assert_eq!(doc.children(artboard).unwrap(), &[a, b]);
        let second = doc.node(b).unwrap();
        assert_eq!(second.style().unwrap().fills()[0], "#d5ffb3");
    }

    #[test]
    fn create_shape_in_a_shape_is_rejected() {
        let (mut doc, _, a, _) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::CreateShape {
                parent: Some(Container::Artboard(a)),
                shape_type: ShapeType::Oval,
                frame: frame(0.0, 0.0, 1.0, 1.0),
                fills: vec![],
                borders: vec![],
                name: None,
            },
        );
        assert!(!result.is_success());
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn move_selection_translates_frames() {
        let (mut doc, _, a, b) = artboard_with_squares();
        execute_command(
            &mut doc,
            Command::Select {
                target: Target::Node(b),
                add_to_selection: false,
            },
        );
        let result = execute_command(
            &mut doc,
            Command::Move {
                target: Target::Selection,
                delta: DVec2::new(200.0, 0.0),
            },
        );
        assert!(result.is_success());
        assert_eq!(doc.node(b).unwrap().frame.x(), 253.0);
        assert_eq!(doc.node(a).unwrap().frame.x(), 53.0);
    }

    #[test]
    fn move_all_keeps_children_relative_to_artboard() {
        let (mut doc, artboard, a, b) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::Move {
                target: Target::All,
                delta: DVec2::new(10.0, 0.0),
            },
        );
        assert_eq!(result, CommandResult::modified(vec![artboard]));
        assert_eq!(doc.node(artboard).unwrap().frame.x(), 10.0);
        assert_eq!(doc.node(a).unwrap().frame.x(), 53.0);
        assert_eq!(doc.node(b).unwrap().frame.x(), 53.0);
    }

    #[test]
    fn set_frame_on_artboard_and_child_only_sets_artboard() {
        let (mut doc, artboard, a, _) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::SetFrame {
                target: Target::Nodes(vec![a, artboard]),
                frame: frame(5.0, 5.0, 300.0, 300.0),
            },
        );
        assert_eq!(result, CommandResult::modified(vec![artboard]));
        assert_eq!(doc.node(artboard).unwrap().frame, frame(5.0, 5.0, 300.0, 300.0));
        assert_eq!(doc.node(a).unwrap().frame, frame(53.0, 213.0, 122.0, 122.0));
    }

    #[test]
    fn empty_selection_target_changes_nothing() {
        let (mut doc, _, a, _) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::Delete {
                target: Target::Selection,
            },
        );
        match result {
            CommandResult::Success { deleted, .. } => assert!(deleted.is_empty()),
            CommandResult::Error { message } => panic!("unexpected error: {message}"),
        }
        assert!(doc.contains(a));
    }

    #[test]
    fn delete_artboard_reports_subtree() {
        let (mut doc, artboard, a, b) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::Delete {
                target: Target::Nodes(vec![artboard, a]),
            },
        );
        match result {
            CommandResult::Success { deleted, .. } => assert_eq!(deleted, vec![artboard, a, b]),
            CommandResult::Error { message } => panic!("unexpected error: {message}"),
        }
        assert!(doc.is_empty());
    }

    #[test]
    fn set_style_skips_artboards() {
        let (mut doc, artboard, a, b) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::SetStyle {
                target: Target::All,
                fills: vec![Color::parse("#FF0000").unwrap()],
                borders: vec![Border::parse("#00FF00", 16.0).unwrap()],
            },
        );
        match result {
            CommandResult::Success { modified, .. } => assert_eq!(modified, vec![a, b]),
            CommandResult::Error { message } => panic!("unexpected error: {message}"),
        }
        assert!(doc.node(artboard).unwrap().style().is_none());
        assert_eq!(doc.node(a).unwrap().style().unwrap().borders()[0].thickness(), 16.0);
    }

    #[test]
    fn reparent_cycle_is_an_error_result() {
        let (mut doc, artboard, _, _) = artboard_with_squares();
        let result = execute_command(
            &mut doc,
            Command::Reparent {
                node: artboard,
                parent: Container::Artboard(artboard),
            },
        );
        assert!(matches!(result, CommandResult::Error { .. }));
    }

    #[test]
    fn batch_stops_at_first_error() {
        let mut doc = Document::new("Batch");
        let missing = NodeId::from_u128(42);
        let result = execute_command(
            &mut doc,
            Command::Batch {
                commands: vec![
                    Command::CreateArtboard {
                        page: None,
                        frame: frame(0.0, 0.0, 400.0, 400.0),
                        name: None,
                    },
                    Command::Rename {
                        node: missing,
                        name: Some("ghost".to_string()),
                    },
                    Command::CreateArtboard {
                        page: None,
                        frame: frame(0.0, 0.0, 10.0, 10.0),
                        name: None,
                    },
                ],
            },
        );
        match result {
            CommandResult::Error { message } => assert!(message.starts_with("Batch failed")),
            CommandResult::Success { .. } => panic!("batch should fail"),
        }
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn query_by_name_and_shape_type() {
        let (mut doc, artboard, a, _) = artboard_with_squares();
        let ids = resolve_target(&doc, &Target::Query(NodeQuery::ByName("square1".into()))).unwrap();
        assert_eq!(ids, vec![a]);

        let artboards = resolve_target(&doc, &Target::Query(NodeQuery::Artboards)).unwrap();
        assert_eq!(artboards, vec![artboard]);

        execute_command(
            &mut doc,
            Command::CreateShape {
                parent: Some(Container::Artboard(artboard)),
                shape_type: ShapeType::Oval,
                frame: frame(253.0, 213.0, 122.0, 122.0),
                fills: vec![],
                borders: vec![],
                name: Some("circle1".to_string()),
            },
        );
        let ovals =
            resolve_target(&doc, &Target::Query(NodeQuery::ByShapeType(ShapeType::Oval))).unwrap();
        assert_eq!(ovals.len(), 1);
    }

    #[test]
    fn selected_layers_query_reports_lines() {
        let (mut doc, _, a, b) = artboard_with_squares();
        let QueryResult::Lines { lines } = execute_query(&doc, Query::GetSelectedLayers) else {
            panic!("expected lines");
        };
        assert_eq!(lines, vec!["No layers are selected."]);

        doc.select([a, b]).unwrap();
        let QueryResult::Lines { lines } = execute_query(&doc, Query::GetSelectedLayers) else {
            panic!("expected lines");
        };
        assert_eq!(lines, vec!["Selected layers:", "1. square1", "2. square2"]);
    }

    #[test]
    fn children_and_bounds_queries() {
        let (doc, artboard, a, _) = artboard_with_squares();
        let QueryResult::Nodes { nodes } = execute_query(
            &doc,
            Query::GetChildren {
                container: Some(Container::Artboard(artboard)),
            },
        ) else {
            panic!("expected nodes");
        };
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, a);
        assert_eq!(nodes[0].kind, NodeInfoKind::Shape(ShapeType::Rectangle));

        let QueryResult::Bounds { min, max } = execute_query(&doc, Query::GetBounds { container: None })
        else {
            panic!("expected bounds");
        };
        assert_eq!(min, Some(DVec2::ZERO));
        assert_eq!(max, Some(DVec2::new(400.0, 400.0)));
    }

    #[test]
    fn page_commands_and_query() {
        let mut doc = Document::new("Pages");
        assert!(execute_command(&mut doc, Command::AddPage { name: "Page 2".into() }).is_success());
        let second = doc.pages()[1].id();
        execute_command(&mut doc, Command::SelectPage { page: second });
        execute_command(
            &mut doc,
            Command::RenamePage {
                page: second,
                name: "Cover".into(),
            },
        );

        let QueryResult::Pages { pages } = execute_query(&doc, Query::GetPages) else {
            panic!("expected pages");
        };
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].name, "Cover");
        assert!(pages[1].selected);

        let result = execute_command(&mut doc, Command::RemovePage { page: second });
        assert!(result.is_success());
        assert_eq!(doc.pages().len(), 1);
        assert!(!execute_command(&mut doc, Command::SelectPage { page: second }).is_success());
    }

    #[test]
    fn query_errors_are_reported() {
        let doc = Document::empty("Empty");
        let result = execute_query(&doc, Query::GetChildren { container: None });
        assert!(matches!(result, QueryResult::Error { .. }));
    }
}
