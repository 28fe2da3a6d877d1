//! Scripting surface for scene documents.
//!
//! Scripts follow the same steps a design-tool automation script does:
//! take the selected page of a document, clear it, add an artboard and
//! fill it with shapes. Everything here is a thin sequence of
//! [`scene_graph::Document`] calls; failures are the document's own errors.
//!
//! ```
//! use node::{Frame, Style};
//! use scene_graph::Document;
//! use script::{selected_page, ArtboardOptions, ShapeOptions};
//!
//! let mut document = Document::new("Example");
//! let mut page = selected_page(&mut document)?;
//! page.clear()?;
//! let artboard = page.add_artboard(ArtboardOptions::new(Frame::new(0.0, 0.0, 400.0, 400.0)?))?;
//! page.add_shape(
//!     ShapeOptions::new(Frame::new(53.0, 213.0, 122.0, 122.0)?)
//!         .parent(artboard)
//!         .style(Style::parse(&["#35E6C9"], &[])?),
//! )?;
//! assert_eq!(document.children(artboard)?.len(), 1);
//! # Ok::<(), scene_graph::SceneError>(())
//! ```

mod builtin;
mod draw;
mod report;
mod scope;

pub use builtin::BuiltinScript;
pub use draw::DrawBuilder;
pub use report::selected_layers_report;
pub use scope::{selected_page, ArtboardOptions, PageScope, ShapeOptions};
