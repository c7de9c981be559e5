//! Query CI/CD use case: the two-phase prepare/execute protocol.
//!
//! # Flow
//!
//! 1. [`prepare`](QueryCicdUseCase::prepare) sends the question. The backend
//!    either answers from its cache (`success`) or returns an instruction and
//!    a cache key (`needs_generation`).
//! 2. On `needs_generation` the agent writes SQL and calls
//!    [`execute`](QueryCicdUseCase::execute) with that cache key.
//!
//! The use case holds no state between the two calls. Successful results from
//! either phase have the same shape. Neither phase retries.

use crate::config::CallerIdentity;
use crate::ports::nl2sql_service::Nl2SqlService;
use crate::use_cases::shared::{EXECUTE, PREPARE, require_non_empty, translate};
use kbsearch_domain::cicd::{
    ActionRequired, BackendStatus, ExecuteRequest, ExecuteResponse, PrepareRequest,
    PrepareResponse, QueryFailure, QueryResponse, QuerySuccess,
};
use kbsearch_domain::tool::value_objects::{BACKEND_ERROR, PROTOCOL_ERROR};
use kbsearch_domain::util::{is_blank, truncate_str};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const CACHE_HIT_MESSAGE: &str = "Query results retrieved from cache";

#[derive(Debug, Clone)]
pub struct ExecuteSqlInput {
    pub sql: String,
    /// Exactly as returned by prepare
    pub cache_key: String,
    pub confirm_cache: bool,
}

impl ExecuteSqlInput {
    pub fn new(sql: impl Into<String>, cache_key: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            cache_key: cache_key.into(),
            confirm_cache: true,
        }
    }

    pub fn with_confirm_cache(mut self, confirm: bool) -> Self {
        self.confirm_cache = confirm;
        self
    }
}

#[derive(Clone)]
pub struct QueryCicdUseCase {
    service: Arc<dyn Nl2SqlService>,
    identity: CallerIdentity,
    rich_ui: bool,
}

impl QueryCicdUseCase {
    pub fn new(service: Arc<dyn Nl2SqlService>, identity: CallerIdentity) -> Self {
        Self {
            service,
            identity,
            rich_ui: false,
        }
    }

    pub fn with_rich_ui(mut self, enabled: bool) -> Self {
        self.rich_ui = enabled;
        self
    }

    /// Phase 1: resolve the question from the backend cache, or obtain the
    /// instruction the agent needs to write SQL.
    pub async fn prepare(&self, question: &str) -> QueryResponse {
        if let Err(e) = require_non_empty(question, "question") {
            return QueryFailure::from(e).into();
        }

        let request = PrepareRequest {
            query: question.to_string(),
            user_id: self.identity.user_id.clone(),
        };
        info!(
            user_id = %request.user_id,
            "Preparing CI/CD query: {}",
            truncate_str(question, 100)
        );

        let response = match self.service.prepare(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Prepare request failed");
                return QueryFailure::from(translate(&e, PREPARE)).into();
            }
        };

        self.handle_prepare(response)
    }

    fn handle_prepare(&self, response: PrepareResponse) -> QueryResponse {
        let status = BackendStatus::parse(response.status.as_deref());
        debug!(status = ?status, cache_key = ?response.cache_key, "Prepare returned");

        match status {
            BackendStatus::Success => {
                let cached = response.cached.unwrap_or(true);
                let mut success = QuerySuccess::new(
                    response.results.unwrap_or_default(),
                    response.row_count,
                    response.sql,
                )
                .with_cached(cached)
                .with_cache_key(response.cache_key)
                .with_message(CACHE_HIT_MESSAGE);

                if self.rich_ui {
                    let banner = cached.then(|| {
                        let uses = response
                            .use_count
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "multiple".to_string());
                        (
                            "Cache Hit",
                            format!(
                                "Results retrieved from cache. Query has been used {} times.",
                                uses
                            ),
                        )
                    });
                    success = success.with_ui(banner);
                }
                QueryResponse::Success(success)
            }
            BackendStatus::NeedsGeneration => match response.cache_key {
                Some(cache_key) if !is_blank(&cache_key) => QueryResponse::ActionRequired(
                    ActionRequired::new(cache_key, response.instruction.unwrap_or_default()),
                ),
                _ => {
                    warn!("Backend requested SQL generation without a cache key");
                    QueryFailure::new(
                        PROTOCOL_ERROR,
                        "Backend requested SQL generation without a cache_key",
                    )
                    .into()
                }
            },
            BackendStatus::Error => QueryFailure::new(
                BACKEND_ERROR,
                response
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            )
            .with_warnings(response.warnings.unwrap_or_default())
            .with_suggestions(response.suggestions.unwrap_or_default())
            .into(),
            BackendStatus::Unrecognized(value) => {
                warn!(status = %value, "Unrecognized prepare status");
                QueryFailure::new(PROTOCOL_ERROR, format!("Unexpected status: {}", value)).into()
            }
        }
    }

    /// Phase 2: run agent-written SQL under the cache key from phase 1.
    pub async fn execute(&self, input: ExecuteSqlInput) -> QueryResponse {
        if let Err(e) = require_non_empty(&input.sql, "sql")
            .and_then(|_| require_non_empty(&input.cache_key, "cache_key"))
        {
            return QueryFailure::from(e).into();
        }

        let request = ExecuteRequest {
            sql: input.sql,
            cache_key: input.cache_key,
            confirm_cache: input.confirm_cache,
            user_id: self.identity.user_id.clone(),
        };
        info!(
            cache_key = %request.cache_key,
            confirm_cache = request.confirm_cache,
            "Executing SQL: {}",
            truncate_str(&request.sql, 200)
        );

        let response = match self.service.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Execute request failed");
                return QueryFailure::from(translate(&e, EXECUTE)).into();
            }
        };

        self.handle_execute(request, response)
    }

    fn handle_execute(&self, request: ExecuteRequest, response: ExecuteResponse) -> QueryResponse {
        let status = BackendStatus::parse(response.status.as_deref());
        debug!(status = ?status, cached = ?response.cached, "Execute returned");

        match status {
            BackendStatus::Success => {
                let cached = response.cached.unwrap_or(false);
                let message = if cached {
                    "Query executed successfully. Cached for future use."
                } else {
                    "Query executed successfully."
                };
                let mut success = QuerySuccess::new(
                    response.results.unwrap_or_default(),
                    response.row_count,
                    response.sql.or(Some(request.sql)),
                )
                .with_cached(cached)
                .with_cache_key(response.cache_key.or(Some(request.cache_key)))
                .with_message(message);

                if self.rich_ui {
                    let banner = cached.then(|| {
                        (
                            "Query Cached",
                            "This query has been cached for faster future access by all team members."
                                .to_string(),
                        )
                    });
                    success = success.with_ui(banner);
                }
                QueryResponse::Success(success)
            }
            BackendStatus::Error => QueryFailure::new(
                BACKEND_ERROR,
                response
                    .message
                    .unwrap_or_else(|| "SQL execution failed".to_string()),
            )
            .with_sql(request.sql)
            .with_error_type(response.error_type)
            .into(),
            // needs_generation is not a valid answer to execute
            other => {
                let value = match other {
                    BackendStatus::Unrecognized(value) => value,
                    _ => "needs_generation".to_string(),
                };
                warn!(status = %value, "Unexpected execute status");
                QueryFailure::new(PROTOCOL_ERROR, format!("Unexpected status: {}", value)).into()
            }
        }
    }
}
