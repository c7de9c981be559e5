//! Tool provider abstraction
//!
//! This module defines the [`ToolProvider`] trait. Each tool group of the
//! server (knowledge-base retrieval, CI/CD queries) is a provider that the
//! tool registry aggregates.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                ToolRegistry                 │
//! │   (aggregates providers, routes by name)    │
//! └─────────────────────────────────────────────┘
//!            │                        │
//!            ▼                        ▼
//!    ┌────────────────┐      ┌────────────────┐
//!    │   Retrieval    │      │     CI/CD      │
//!    │   Provider     │      │    Provider    │
//!    └────────────────┘      └────────────────┘
//! ```
//!
//! When two providers expose the same tool name, the one with the higher
//! [`priority`](ToolProvider::priority) wins.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolResult;

/// Error type for tool provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider is disabled or not configured
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    /// Failed to discover tools from the provider
    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),
}

/// Tool provider abstraction - a group of tools backed by one external service
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier for this provider (e.g. "retrieval", "cicd")
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Priority for tool resolution (higher = preferred)
    fn priority(&self) -> i32 {
        0
    }

    /// Check if the provider is enabled and properly configured
    async fn is_available(&self) -> bool;

    /// Discover the tools this provider can execute
    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError>;

    /// Alternate names accepted for this provider's tools, as `(alias, canonical)`
    fn aliases(&self) -> &[(&'static str, &'static str)] {
        &[]
    }

    /// Execute a tool call
    ///
    /// The tool_name in the call must match one of the tools
    /// returned by `discover_tools()`.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Check if this provider has a specific tool
    async fn has_tool(&self, tool_name: &str) -> bool {
        match self.discover_tools().await {
            Ok(tools) => tools.iter().any(|t| t.name == tool_name),
            Err(_) => false,
        }
    }
}
