//! MCP binding: newline-delimited JSON-RPC 2.0 over stdio
//!
//! Only the tool surface is implemented (`initialize`, `ping`,
//! `tools/list`, `tools/call`). Logging must never touch stdout.

pub mod protocol;
mod server;

pub use server::{ServerError, StdioServer};
