//! NL2SQL service port
//!
//! The backend owns slot extraction, the query cache and SQL execution.
//! This port only carries requests to it.

use async_trait::async_trait;
use kbsearch_domain::cicd::{ExecuteRequest, ExecuteResponse, PrepareRequest, PrepareResponse};

use super::backend::BackendError;

#[async_trait]
pub trait Nl2SqlService: Send + Sync {
    /// Resolve a question from the cache, or obtain a generation instruction
    async fn prepare(&self, request: &PrepareRequest) -> Result<PrepareResponse, BackendError>;

    /// Run agent-written SQL, optionally caching it under the request's key
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, BackendError>;

    /// Raw body of the cache statistics endpoint
    async fn cache_stats(&self) -> Result<serde_json::Value, BackendError>;

    /// Raw body of the cache listing endpoint
    async fn cache_list(&self, limit: i64) -> Result<serde_json::Value, BackendError>;
}
