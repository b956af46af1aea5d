//! Error types for the client crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by NocoDB operations.
///
/// Table resolution failures and remote errors bubble unmodified up to the
/// tool layer; the `Operation` variant carries the name of the failed
/// operation so the caller sees which step broke.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No table in the base carries the requested display title.
    #[error("Table '{name}' not found")]
    TableNotFound { name: String },

    /// A caller-supplied value is unusable (e.g. a bulk item missing its
    /// required field).
    #[error("{0}")]
    InvalidArgument(String),

    /// The remote service answered with a non-success status.
    #[error("remote service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Network failure or request timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A failure wrapped with the operation that produced it.
    #[error("Error {operation}: {message}")]
    Operation { operation: String, message: String },

    /// The client could not be constructed from the given configuration.
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Wrap a failure with the name of the operation that produced it,
    /// preserving the underlying message.
    pub fn operation(operation: &str, source: ClientError) -> Self {
        Self::Operation {
            operation: operation.to_string(),
            message: source.to_string(),
        }
    }
}
