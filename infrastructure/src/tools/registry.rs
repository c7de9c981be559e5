//! Tool Registry
//!
//! The [`ToolRegistry`] aggregates multiple tool providers and implements
//! [`ToolExecutorPort`]. It handles tool discovery, alias resolution,
//! argument validation, and execution routing based on priority.
//!
//! # Usage
//!
//! ```ignore
//! use kbsearch_infrastructure::tools::{ToolRegistry, RetrievalToolProvider, CicdToolProvider};
//!
//! let mut registry = ToolRegistry::new()
//!     .register(RetrievalToolProvider::new(rag, &options))
//!     .register(CicdToolProvider::new(nl2sql, identity, &options));
//!
//! // Discover available tools from all providers
//! registry.discover().await;
//!
//! // Legacy names resolve to their canonical tool
//! assert!(registry.has_tool("search"));
//!
//! let call = ToolCall::new("query_cicd_prepare").with_arg("question", "last deploy to prod?");
//! let result = registry.execute(&call).await;
//! ```
//!
//! # Discovery Process
//!
//! The `discover()` method must be called before using the registry:
//!
//! 1. Providers are sorted by priority (highest first)
//! 2. Unavailable (disabled) providers are skipped
//! 3. Tools are registered, with higher-priority providers winning conflicts
//! 4. Provider aliases are registered when their canonical tool is present

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kbsearch_application::ToolExecutorPort;
use kbsearch_domain::tool::{
    DefaultToolValidator, ToolValidator,
    entities::{ToolCall, ToolSpec},
    provider::ToolProvider,
    value_objects::{PROTOCOL_ERROR, ToolError, ToolResult},
};

/// Tool registry that aggregates multiple providers
///
/// Implements `ToolExecutorPort` by routing tool calls to the appropriate
/// provider. Calls are validated against the tool definition before they
/// reach a provider.
pub struct ToolRegistry {
    /// Registered providers
    providers: Vec<Arc<dyn ToolProvider>>,
    /// Tool name -> provider ID mapping (cached after discovery)
    tool_mapping: HashMap<String, String>,
    /// Merged tool specification
    tool_spec: ToolSpec,
    /// Whether discovery has been run
    discovered: bool,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            tool_mapping: HashMap::new(),
            tool_spec: ToolSpec::new(),
            discovered: false,
        }
    }

    /// Register a tool provider
    pub fn register<P: ToolProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self.discovered = false; // Invalidate cache
        self
    }

    /// Register a tool provider (Arc version)
    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.providers.push(provider);
        self.discovered = false;
        self
    }

    /// Discover tools from all providers
    ///
    /// Providers that fail discovery are logged and skipped.
    pub async fn discover(&mut self) {
        self.providers
            .sort_by_key(|p| std::cmp::Reverse(p.priority()));

        let mut tool_spec = ToolSpec::new();
        let mut tool_mapping = HashMap::new();

        for provider in &self.providers {
            if !provider.is_available().await {
                tracing::debug!(provider = provider.id(), "Provider disabled, skipping");
                continue;
            }

            match provider.discover_tools().await {
                Ok(tools) => {
                    for tool in tools {
                        if !tool_mapping.contains_key(&tool.name) {
                            tracing::debug!(
                                tool = %tool.name,
                                provider = provider.id(),
                                "Registered tool"
                            );
                            tool_mapping.insert(tool.name.clone(), provider.id().to_string());
                            tool_spec = tool_spec.register(tool);
                        } else {
                            tracing::trace!(
                                tool = %tool.name,
                                provider = provider.id(),
                                "Tool already registered by higher priority provider"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.id(),
                        error = %e,
                        "Failed to discover tools from provider"
                    );
                    continue;
                }
            }

            for (alias, canonical) in provider.aliases() {
                if tool_mapping.get(*canonical).map(String::as_str) == Some(provider.id()) {
                    tool_spec = tool_spec.register_alias(*alias, *canonical);
                }
            }
        }

        self.tool_spec = tool_spec;
        self.tool_mapping = tool_mapping;
        self.discovered = true;
    }

    /// Get the provider for a specific (canonical) tool
    fn provider_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolProvider>> {
        let provider_id = self.tool_mapping.get(tool_name)?;
        self.providers.iter().find(|p| p.id() == provider_id)
    }

    /// Get a list of registered provider IDs
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> RegistryStats {
        let mut tools_per_provider = HashMap::new();
        for provider_id in self.tool_mapping.values() {
            *tools_per_provider.entry(provider_id.clone()).or_insert(0) += 1;
        }

        RegistryStats {
            total_providers: self.providers.len(),
            total_tools: self.tool_mapping.len(),
            tools_per_provider,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the registry
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_providers: usize,
    pub total_tools: usize,
    pub tools_per_provider: HashMap<String, usize>,
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if !self.discovered {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::new(
                    PROTOCOL_ERROR,
                    "Registry not initialized. Call discover() first.",
                ),
            );
        }

        let Some(definition) = self.tool_spec.get_resolved(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            );
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            tracing::debug!(tool = %call.tool_name, error = %e, "Rejected tool call");
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        // Providers only know canonical names
        let canonical = ToolCall {
            tool_name: definition.name.clone(),
            arguments: call
                .arguments
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        match self.provider_for(&canonical.tool_name) {
            Some(provider) => {
                tracing::debug!(
                    tool = %canonical.tool_name,
                    provider = provider.id(),
                    "Dispatching tool call"
                );
                provider.execute(&canonical).await
            }
            None => ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            ),
        }
    }
}
