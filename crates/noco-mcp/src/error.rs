//! Error types for the MCP crate.

use thiserror::Error;

/// Errors that can occur while serving the MCP transport. Tool-level
/// failures never surface here; they travel inside the response envelope.
#[derive(Debug, Error)]
pub enum McpError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error on the stdio transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
