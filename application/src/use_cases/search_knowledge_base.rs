//! Search Knowledge Base use case.
//!
//! Forwards a query to the retrieval backend in retrieve-only mode and
//! renders the ranked chunks for the calling agent, which writes the final
//! answer itself.

use crate::ports::retrieval_service::RetrievalService;
use crate::use_cases::shared::{SEARCH, require_non_empty, translate};
use kbsearch_domain::retrieval::{SearchRequest, format_search_results};
use kbsearch_domain::tool::ToolError;
use kbsearch_domain::util::truncate_str;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the [`SearchKnowledgeBaseUseCase`].
#[derive(Debug, Clone)]
pub struct SearchKnowledgeBaseInput {
    /// Natural-language query.
    pub query: String,
    /// Retrieval profile, forwarded unmodified when present.
    pub profile: Option<String>,
    /// Number of chunks to request; the configured default when `None`.
    pub top_k: Option<i64>,
}

impl SearchKnowledgeBaseInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            profile: None,
            top_k: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_top_k(mut self, top_k: Option<i64>) -> Self {
        self.top_k = top_k;
        self
    }
}

#[derive(Clone)]
pub struct SearchKnowledgeBaseUseCase {
    service: Arc<dyn RetrievalService>,
    default_top_k: i64,
}

impl SearchKnowledgeBaseUseCase {
    pub fn new(service: Arc<dyn RetrievalService>) -> Self {
        Self {
            service,
            default_top_k: 5,
        }
    }

    pub fn with_default_top_k(mut self, top_k: i64) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Run the search and return the text block shown to the agent.
    ///
    /// Zero chunks yields [`NO_RELEVANT_INFORMATION`](kbsearch_domain::retrieval::NO_RELEVANT_INFORMATION).
    pub async fn execute(&self, input: SearchKnowledgeBaseInput) -> Result<String, ToolError> {
        require_non_empty(&input.query, "query")?;

        let request = SearchRequest::new(input.query, input.top_k.unwrap_or(self.default_top_k))
            .with_profile(input.profile);
        info!(
            top_k = request.top_k,
            profile = ?request.profile,
            "Searching knowledge base: {}",
            truncate_str(&request.query, 100)
        );

        let response = self.service.search(&request).await.map_err(|e| {
            warn!(error = %e, "Knowledge base search failed");
            translate(&e, SEARCH)
        })?;

        debug!(
            chunks = response.chunks.len(),
            query_id = ?response.query_id,
            latency_ms = ?response.metrics.latency_ms,
            "Search returned"
        );
        Ok(format_search_results(&response))
    }
}
