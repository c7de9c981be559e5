//! Tool Executor port
//!
//! Defines the interface for executing the adapter tools by name.

use async_trait::async_trait;
use kbsearch_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// The protocol binding and the CLI execute tools through this port.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool (or alias) is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().resolve(name).is_some()
    }

    /// Get the definition of a specific tool, resolving aliases
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available tools (sorted)
    fn available_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tool_spec().names().collect();
        names.sort_unstable();
        names
    }

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
