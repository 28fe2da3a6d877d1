use scene_graph::Document;

/// Logs the selected layers of `document`, one line per event, and returns
/// the lines.
///
/// With nothing selected the single line is `No layers are selected.`;
/// otherwise `Selected layers:` is followed by `1. <name>`, `2. <name>`, ...
/// in selection order.
pub fn selected_layers_report(document: &Document) -> Vec<String> {
    let lines = document.selection().report_lines();
    for line in &lines {
        log::info!("{line}");
    }
    lines
}
