use crate::{Frame, NodeId, PageId, Style};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The geometric primitive a shape draws.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ShapeType {
    #[default]
    Rectangle,
    Oval,
    Triangle,
    Polygon,
    Star,
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A canvas region holding shapes.
    Artboard,
    /// A drawable primitive.
    Shape { shape_type: ShapeType, style: Style },
}

/// Where a node lives: directly on a page, or inside an artboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Container {
    Page(PageId),
    Artboard(NodeId),
}

impl From<PageId> for Container {
    fn from(id: PageId) -> Self {
        Self::Page(id)
    }
}

impl From<NodeId> for Container {
    fn from(id: NodeId) -> Self {
        Self::Artboard(id)
    }
}

/// An artboard or shape.
///
/// A `Node` is plain data. It becomes part of a document when it is
/// inserted into a container, which is the only way a node gets a parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub frame: Frame,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind, frame: Frame) -> Self {
        Self {
            id: NodeId::new(),
            name: None,
            frame,
            kind,
        }
    }

    pub fn artboard(frame: Frame) -> Self {
        Self::new(NodeKind::Artboard, frame)
    }

    pub fn shape(shape_type: ShapeType, frame: Frame, style: Style) -> Self {
        Self::new(NodeKind::Shape { shape_type, style }, frame)
    }

    pub fn rectangle(frame: Frame, style: Style) -> Self {
        Self::shape(ShapeType::Rectangle, frame, style)
    }

    pub fn oval(frame: Frame, style: Style) -> Self {
        Self::shape(ShapeType::Oval, frame, style)
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_artboard(&self) -> bool {
        matches!(self.kind, NodeKind::Artboard)
    }

    pub fn shape_type(&self) -> Option<ShapeType> {
        match &self.kind {
            NodeKind::Shape { shape_type, .. } => Some(*shape_type),
            NodeKind::Artboard => None,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match &self.kind {
            NodeKind::Shape { style, .. } => Some(style),
            NodeKind::Artboard => None,
        }
    }

    /// The name shown for this node in layer lists.
    ///
    /// Unnamed nodes fall back to their kind, e.g. `Artboard` or `Oval`.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.kind) {
            (Some(name), _) => name.clone(),
            (None, NodeKind::Artboard) => "Artboard".to_string(),
            (None, NodeKind::Shape { shape_type, .. }) => shape_type.to_string(),
        }
    }
}
