//! Value types for scene documents.
//!
//! This crate holds the pure data side of a document: frames, colors,
//! styles and the [`Node`] description of artboards and shapes. It has no
//! notion of ownership or hierarchy; the `scene_graph` crate attaches nodes
//! to pages and artboards and keeps the tree consistent.
//!
//! Every type here validates its input when it is constructed, so a value
//! that exists is always well formed.

mod color;
mod error;
mod geometry;
mod id;
mod node;
mod style;

pub use color::Color;
pub use error::NodeError;
pub use geometry::Frame;
pub use id::{NodeId, PageId};
pub use node::{Container, Node, NodeKind, ShapeType};
pub use style::{Border, Style};
