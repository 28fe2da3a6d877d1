//! Command and query interface for scene documents.
//!
//! This crate defines the typed command language for document operations.
//! Commands represent intent and are:
//! - Serializable (for recording, scripting and the CLI)
//! - Intent-based (what to do, not how to do it)
//! - Executed against an explicit [`scene_graph::Document`]
//!
//! # Example
//! ```
//! use api::{execute_command, Command, CommandResult};
//! use node::Frame;
//! use scene_graph::Document;
//!
//! let mut document = Document::new("Example");
//! let cmd = Command::CreateArtboard {
//!     page: None,
//!     frame: Frame::new(0.0, 0.0, 400.0, 400.0).unwrap(),
//!     name: Some("My Artboard Name".into()),
//! };
//! let result = execute_command(&mut document, cmd);
//! assert!(matches!(result, CommandResult::Success { .. }));
//! ```

mod command;
mod executor;
mod message;
mod query;
mod target;

pub use command::*;
pub use executor::{execute_command, execute_query};
pub use message::process_message;
pub use query::*;
pub use target::*;
