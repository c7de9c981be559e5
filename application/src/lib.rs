//! Application layer for kbsearch-mcp
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdapterOptions, CallerIdentity};
pub use ports::{
    backend::BackendError, nl2sql_service::Nl2SqlService, retrieval_service::RetrievalService,
    tool_executor::ToolExecutorPort, tool_schema::ToolSchemaPort,
};
pub use use_cases::cache_inspection::CacheInspectionUseCase;
pub use use_cases::query_cicd::{ExecuteSqlInput, QueryCicdUseCase};
pub use use_cases::search_knowledge_base::{SearchKnowledgeBaseInput, SearchKnowledgeBaseUseCase};
pub use use_cases::submit_feedback::{SubmitFeedbackInput, SubmitFeedbackUseCase};
