//! # noco-client
//!
//! Client for the NocoDB v2 REST API, used by the MCP server to translate
//! tool calls into remote requests.
//!
//! Tables are addressed by display name everywhere in this crate; every
//! operation resolves the name to the service's internal table identifier
//! first (one listing call, no caching, so renames take effect immediately).
//! Record data and filter strings are deliberately opaque: they are carried
//! as [`serde_json::Value`] / plain strings and never validated locally.
//!
//! Bulk operations are a client-side loop over independent single-record
//! requests, driven by [`BulkSequence`]: strictly in input order, fail-fast
//! at the first item missing its required field, no rollback.

pub mod bulk;
pub mod config;
pub mod error;
pub mod http;
pub mod records;
pub mod resolver;
pub mod schema;

pub use bulk::{BulkItem, BulkSequence, BulkStep};
pub use config::ConnectionConfig;
pub use error::ClientError;
pub use http::NocoClient;
pub use records::{CallTrace, RecordQuery};
pub use schema::{ColumnType, TableColumn};
