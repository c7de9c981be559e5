//! Domain layer for kbsearch-mcp
//!
//! This crate contains the tool model and the pure logic of the adapters:
//! wire types, result classification, summarization and formatting.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Retrieval
//!
//! A search returns ranked chunks from the knowledge base. They are rendered
//! with citation labels and a sources list; the returned query id lets the
//! agent submit feedback later.
//!
//! ## Two-phase CI/CD queries
//!
//! - **Prepare**: the backend answers from its query cache, or asks the agent
//!   to write SQL for a cache key
//! - **Execute**: the agent's SQL runs and may be cached under that key

pub mod cicd;
pub mod retrieval;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use cicd::{
    ActionRequired, BackendStatus, CacheList, CacheReport, CacheStats, ExecuteRequest,
    ExecuteResponse, PrepareRequest, PrepareResponse, QueryFailure, QueryResponse, QuerySuccess,
    ResultKind, ResultSet, ResultSummary, Row, UiComponent,
};
pub use retrieval::{
    FeedbackRequest, FeedbackResponse, NO_RELEVANT_INFORMATION, RetrievedChunk, SearchRequest,
    SearchResponse, format_search_results,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    provider::{ProviderError, ToolProvider},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
