use crate::{selected_page, ArtboardOptions, ShapeOptions};
use node::{Border, Color, Container, Frame, NodeId, ShapeType, Style};
use scene_graph::{Document, Result};

/// Pen-style drawing on the selected page.
///
/// The builder keeps a current fill and stroke that apply to every shape
/// drawn after they are set. Shapes are named after their kind and a running
/// counter (`rect0`, `oval1`, ...). Without a fill, shapes are black.
pub struct DrawBuilder<'a> {
    document: &'a mut Document,
    parent: Option<Container>,
    fill: Option<Color>,
    stroke: Option<Border>,
    shape_id: usize,
}

impl<'a> DrawBuilder<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            parent: None,
            fill: None,
            stroke: None,
            shape_id: 0,
        }
    }

    /// Clears the selected page and starts a `width` x `height` artboard at
    /// the origin. Later shapes are drawn into it.
    pub fn new_document(&mut self, width: f64, height: f64) -> Result<NodeId> {
        let frame = Frame::new(0.0, 0.0, width, height)?;
        let mut page = selected_page(self.document)?;
        page.clear()?;
        let artboard = page.add_artboard(ArtboardOptions::new(frame))?;
        self.parent = Some(Container::Artboard(artboard));
        Ok(artboard)
    }

    pub fn fill(&mut self, color: Color) {
        self.fill = Some(color);
    }

    pub fn no_fill(&mut self) {
        self.fill = None;
    }

    pub fn stroke(&mut self, color: Color, thickness: f64) -> Result<()> {
        self.stroke = Some(Border::new(color, thickness)?);
        Ok(())
    }

    pub fn no_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<NodeId> {
        self.shape(ShapeType::Rectangle, "rect", Frame::new(x, y, width, height)?)
    }

    pub fn oval(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<NodeId> {
        self.shape(ShapeType::Oval, "oval", Frame::new(x, y, width, height)?)
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    fn shape(&mut self, shape_type: ShapeType, prefix: &str, frame: Frame) -> Result<NodeId> {
        let mut style = Style::filled(self.fill.clone().unwrap_or_else(Color::black));
        if let Some(stroke) = &self.stroke {
            style = style.with_border(stroke.clone());
        }

        let mut options = ShapeOptions::new(frame)
            .shape_type(shape_type)
            .style(style)
            .name(format!("{prefix}{}", self.shape_id));
        if let Some(parent) = self.parent {
            options = options.parent(parent);
        }

        let id = selected_page(self.document)?.add_shape(options)?;
        self.shape_id += 1;
        Ok(id)
    }
}
