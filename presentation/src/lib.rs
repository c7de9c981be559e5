//! Presentation layer for kbsearch-mcp
//!
//! This crate contains the CLI definitions, the MCP stdio binding,
//! console formatting for one-shot calls, and progress reporting.

pub mod cli;
pub mod mcp;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use mcp::{ServerError, StdioServer};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
