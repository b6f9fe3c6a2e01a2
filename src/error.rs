//! Error types for the canvas editor.
//!
//! None of these reach the user: the [`EditorController`](crate::EditorController)
//! logs them and turns the failing input into a no-op.

use crate::registry::NodeId;
use thiserror::Error;

/// Errors produced by registry, payload and configuration operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// The drag payload could not be decoded into a template.
    #[error("malformed drag payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The drag payload was empty.
    #[error("empty drag payload")]
    EmptyPayload,

    /// An operation referenced a node that is not in the registry.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A delete was requested while nothing was selected.
    #[error("no node is selected")]
    NoSelection,

    /// The editor configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
