//! # noco-mcp
//!
//! MCP (Model Context Protocol) server exposing NocoDB table operations as
//! typed tools for AI agents to consume.
//!
//! ## Architecture
//!
//! ```text
//! AI Agent (Claude, GPT, etc.)
//!       │
//!       │ MCP protocol over stdio (list tools / call tool)
//!       ▼
//! ┌──────────────────┐
//! │  noco-mcp server │
//! │  1. Validate     │  ← tool input schema
//! │     arguments    │
//! │  2. Dispatch to  │  ← noco-client
//! │     operation    │
//! │  3. Return JSON  │
//! └────────┬─────────┘
//!          │  REST (xc-token auth)
//!          ▼
//!    NocoDB deployment
//! ```
//!
//! One call is handled at a time by the stdio loop; the server holds no
//! mutable state across calls, so nothing here depends on that.

pub mod catalog;
pub mod error;
pub mod executor;
pub mod protocol;
pub mod resource;
pub mod server;
pub mod tools;

pub use error::McpError;
pub use executor::{ExecutionResult, ToolExecutor};
pub use protocol::{
    CallToolParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolAnnotations, ToolContent,
    ToolDefinition,
};
pub use server::McpServer;
pub use tools::ToolRegistry;
