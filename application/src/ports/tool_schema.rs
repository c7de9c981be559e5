//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are described on
//! the wire" (infrastructure). The protocol binding lists tools as JSON
//! Schema objects produced through this port.

use kbsearch_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to `{name, description, inputSchema}`.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
