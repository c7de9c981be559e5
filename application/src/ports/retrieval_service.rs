//! Retrieval service port
//!
//! Defines the interface to the knowledge-base retrieval backend.

use async_trait::async_trait;
use kbsearch_domain::retrieval::{FeedbackRequest, FeedbackResponse, SearchRequest, SearchResponse};

use super::backend::BackendError;

/// Port for the retrieval (RAG) backend
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait RetrievalService: Send + Sync {
    /// Retrieve ranked chunks for a query
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError>;

    /// Record relevance feedback for an earlier search
    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError>;
}
