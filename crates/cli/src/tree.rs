//! Plain-text layer tree.

use node::{Container, Node, NodeId};
use scene_graph::Document;
use std::fmt::Write;

/// Renders pages and their layers, one per line, indented by depth.
///
/// The selected page and selected layers are marked with `*`.
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", doc.name());
    let selected_page = doc.selected_page().map(|page| page.id());
    for page in doc.pages() {
        let marker = if selected_page == Some(page.id()) { " *" } else { "" };
        let _ = writeln!(out, "  page {:?}{}", page.name(), marker);
        render_children(doc, page.children(), 2, &mut out);
    }
    out
}

fn render_children(doc: &Document, ids: &[NodeId], depth: usize, out: &mut String) {
    for node in ids.iter().filter_map(|id| doc.node(*id)) {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), describe(doc, node));
        if node.is_artboard() {
            if let Ok(children) = doc.children(Container::Artboard(node.id)) {
                render_children(doc, children, depth + 1, out);
            }
        }
    }
}

fn describe(doc: &Document, node: &Node) -> String {
    let kind = match node.shape_type() {
        Some(shape_type) => shape_type.to_string().to_lowercase(),
        None => "artboard".to_string(),
    };
    let frame = node.frame;
    let mut line = format!(
        "{} {:?} ({}, {}) {}x{}",
        kind,
        node.display_name(),
        frame.x(),
        frame.y(),
        frame.width(),
        frame.height()
    );
    if let Some(style) = node.style() {
        for fill in style.fills() {
            let _ = write!(line, " fill {}", fill);
        }
        for border in style.borders() {
            let _ = write!(line, " border {} {}", border.color(), border.thickness());
        }
    }
    if doc.is_selected(node.id) {
        line.push_str(" *");
    }
    line
}
