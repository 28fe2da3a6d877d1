use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};
use node::{Container, Frame, ShapeType, Style};
use scene_graph::Document;
use script::{selected_layers_report, selected_page, ArtboardOptions, BuiltinScript, ShapeOptions};

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Records `script` log lines per test thread.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info && metadata.target().starts_with("script")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            CAPTURED.with(|lines| lines.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    // Only the first test to get here installs the logger.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Info);
    CAPTURED.with(|lines| lines.borrow_mut().clear());
    let result = f();
    let lines = CAPTURED.with(|lines| lines.borrow_mut().drain(..).collect());
    (result, lines)
}

fn frame(x: f64, y: f64, w: f64, h: f64) -> Frame {
    Frame::new(x, y, w, h).unwrap()
}

#[test]
fn artboard_with_two_squares() {
    let mut doc = Document::new("Scenario");
    let mut page = selected_page(&mut doc).unwrap();
    let artboard = page
        .add_artboard(ArtboardOptions::new(frame(0.0, 0.0, 400.0, 400.0)))
        .unwrap();
    page.add_shape(
        ShapeOptions::new(frame(53.0, 213.0, 122.0, 122.0))
            .parent(artboard)
            .name("square1")
            .style(Style::parse(&["#35E6C9"], &[]).unwrap()),
    )
    .unwrap();
    page.add_shape(
        ShapeOptions::new(frame(253.0, 213.0, 122.0, 122.0))
            .parent(artboard)
            .name("square2")
            .style(Style::parse(&["#d5ffb3"], &[]).unwrap()),
    )
    .unwrap();

    let children = doc.child_nodes(artboard).unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].frame, frame(53.0, 213.0, 122.0, 122.0));
    assert_eq!(children[1].style().unwrap().fills(), ["#d5ffb3"].as_slice());
}

#[test]
fn empty_selection_logs_nothing_selected() {
    let doc = Document::new("Scenario");
    let (lines, logged) = capture(|| selected_layers_report(&doc));

    assert_eq!(lines, vec!["No layers are selected."]);
    assert_eq!(logged, lines);
    assert_eq!(doc.selection().iter().count(), 0);
}

#[test]
fn selected_layers_are_numbered_in_order() {
    let mut doc = Document::new("Scenario");
    let mut page = selected_page(&mut doc).unwrap();
    let a = page
        .add_shape(ShapeOptions::new(frame(0.0, 0.0, 10.0, 10.0)).name("A"))
        .unwrap();
    let b = page
        .add_shape(ShapeOptions::new(frame(20.0, 0.0, 10.0, 10.0)).name("B"))
        .unwrap();
    doc.select([a, b]).unwrap();

    let (_, logged) = capture(|| BuiltinScript::SelectedLayers.run(&mut doc).unwrap());
    assert_eq!(logged, vec!["Selected layers:", "1. A", "2. B"]);
}

#[test]
fn first_draw_replaces_page_contents() {
    let mut doc = Document::new("Scenario");
    BuiltinScript::AnotherScript.run(&mut doc).unwrap();
    BuiltinScript::FirstDraw.run(&mut doc).unwrap();

    let page = doc.selected_page_id().unwrap();
    let top = doc.child_nodes(page).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].display_name(), "My Artboard Name");

    let squares = doc.child_nodes(top[0].id).unwrap();
    assert_eq!(squares.len(), 1);
    assert_eq!(squares[0].style().unwrap().fills()[0], "#35E6C9");
}

#[test]
fn another_script_draws_bordered_circle_last() {
    let mut doc = Document::new("Scenario");
    BuiltinScript::AnotherScript.run(&mut doc).unwrap();

    let page = doc.selected_page_id().unwrap();
    let artboard = doc.children(page).unwrap()[0];
    let shapes = doc.child_nodes(Container::Artboard(artboard)).unwrap();
    assert_eq!(shapes.len(), 4);
    assert_eq!(shapes[2].frame, frame(253.0, 313.0, 50.0, 50.0));

    let circle = shapes[3];
    assert_eq!(circle.shape_type(), Some(ShapeType::Oval));
    let border = &circle.style().unwrap().borders()[0];
    assert_eq!(border.color(), &"#00FF00");
    assert_eq!(border.thickness(), 16.0);
}

#[test]
fn pagebot_demo_fills_red_and_dark_blue() {
    let mut doc = Document::new("Scenario");
    BuiltinScript::PagebotDemo.run(&mut doc).unwrap();

    let page = doc.selected_page_id().unwrap();
    let artboard = doc.children(page).unwrap()[0];
    let fills: Vec<String> = doc
        .child_nodes(artboard)
        .unwrap()
        .iter()
        .map(|node| node.style().unwrap().fills()[0].to_hex())
        .collect();
    assert_eq!(fills, vec!["#FF0000", "#00008B"]);
}
