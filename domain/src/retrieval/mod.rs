//! Knowledge-base retrieval
//!
//! Request/response bodies of the retrieval backend and the text the
//! `search_knowledge_base` tool hands back to the agent.

pub mod entities;
pub mod format;

pub use entities::{
    FeedbackRequest, FeedbackResponse, RetrievedChunk, SearchMetrics, SearchRequest, SearchResponse,
};
pub use format::{NO_RELEVANT_INFORMATION, format_search_results};
