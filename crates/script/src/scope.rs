use node::{Container, Frame, Node, NodeId, PageId, ShapeType, Style};
use scene_graph::{Document, Result};

/// Options for a new artboard.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtboardOptions {
    frame: Frame,
    name: Option<String>,
}

impl ArtboardOptions {
    pub fn new(frame: Frame) -> Self {
        Self { frame, name: None }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Options for a new shape.
///
/// Without a parent the shape is placed directly on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeOptions {
    frame: Frame,
    parent: Option<Container>,
    shape_type: ShapeType,
    style: Style,
    name: Option<String>,
}

impl ShapeOptions {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            parent: None,
            shape_type: ShapeType::default(),
            style: Style::default(),
            name: None,
        }
    }

    pub fn parent(mut self, parent: impl Into<Container>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn shape_type(mut self, shape_type: ShapeType) -> Self {
        self.shape_type = shape_type;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The selected page of a document, ready to be drawn on.
pub struct PageScope<'a> {
    document: &'a mut Document,
    page: PageId,
}

/// Takes the selected page of `document`.
///
/// Fails with [`scene_graph::SceneError::NoSelectedPage`] when the document
/// has no pages.
pub fn selected_page(document: &mut Document) -> Result<PageScope<'_>> {
    let page = document.selected_page_id()?;
    Ok(PageScope { document, page })
}

impl<'a> PageScope<'a> {
    pub fn page_id(&self) -> PageId {
        self.page
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    /// Removes every layer from the page.
    pub fn clear(&mut self) -> Result<Vec<NodeId>> {
        self.document.clear_children(self.page)
    }

    pub fn add_artboard(&mut self, options: ArtboardOptions) -> Result<NodeId> {
        self.document
            .create_artboard(self.page, options.frame, options.name.as_deref())
    }

    pub fn add_shape(&mut self, options: ShapeOptions) -> Result<NodeId> {
        let parent = options.parent.unwrap_or(Container::Page(self.page));
        let mut shape = Node::shape(options.shape_type, options.frame, options.style);
        shape.name = options.name;
        self.document.insert(parent, shape)
    }
}
