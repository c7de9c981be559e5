//! Tool domain module
//!
//! Defines how the adapters of this server are described to, and invoked by,
//! the calling agent.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "query_ci_data" → "query_cicd_prepare"
//!        └─ tools:   "query_cicd_prepare" → ToolDefinition
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Registry of available tools + alias mappings
//! - [`ToolDefinition`]: Name, agent-facing description, parameters with defaults
//! - [`ToolCall`]: An invocation request with arguments
//! - [`ToolResult`]: Text output, optional structured payload, or a [`ToolError`]
//! - [`ToolValidator`]: Pure parameter validation
//! - [`ToolProvider`]: A group of tools backed by one external service

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use provider::{ProviderError, ToolProvider};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
