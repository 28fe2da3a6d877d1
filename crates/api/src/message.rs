//! JSON message handling for command-line clients.
//!
//! A message is one JSON object holding either a [`Command`] or a [`Query`].
//! The response is always a single JSON object, so a client can send
//! messages line by line and read one response line back for each.

use crate::{execute_command, execute_query, Command, Query};
use scene_graph::Document;
use serde::{Deserialize, Serialize};

/// Process a JSON message (command or query) and return the JSON response.
pub fn process_message(doc: &mut Document, json: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return error_response(format!("Invalid JSON: {e}")),
    };

    // Try to parse as command first
    let command_error = match Command::deserialize(&value) {
        Ok(cmd) => return to_response(&execute_command(doc, cmd)),
        Err(e) => e,
    };

    // Try to parse as query
    if let Ok(query) = Query::deserialize(&value) {
        return to_response(&execute_query(doc, query));
    }

    log::warn!("rejected message: {command_error}");
    error_response(format!("Not a valid command or query: {command_error}"))
}

fn to_response(result: &impl Serialize) -> String {
    serde_json::to_string(result)
        .unwrap_or_else(|e| error_response(format!("Serialization failed: {e}")))
}

fn error_response(message: String) -> String {
    serde_json::json!({ "status": "error", "message": message }).to_string()
}
