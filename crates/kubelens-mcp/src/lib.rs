//! MCP dispatch layer for kubelens
//!
//! This crate holds the tool catalog, the typed command decode, the
//! dispatcher with its per-kind projections, and the JSON-RPC 2.0 stdio
//! server that exposes the catalog to MCP clients.

pub mod catalog;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod project;
pub mod server;

pub use dispatch::{Dispatcher, ToolOutput, ToolResponse};
pub use error::ToolError;
pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer};
