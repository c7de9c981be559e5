//! CI/CD database tools
//!
//! | Tool | Phase |
//! |------|-------|
//! | `query_cicd_prepare` | 1: cache lookup or generation instruction |
//! | `query_cicd_execute` | 2: run agent-written SQL, optionally cache it |
//! | `query_cicd_cache_stats` | cache introspection |
//! | `query_cicd_cache_list` | cache introspection |
//!
//! Every tool answers with a JSON payload carrying a `status` field. The
//! payload is both the text content and the structured content of the
//! result; `error` payloads additionally mark the result as failed.

use async_trait::async_trait;
use kbsearch_application::{
    AdapterOptions, CacheInspectionUseCase, CallerIdentity, ExecuteSqlInput, Nl2SqlService,
    QueryCicdUseCase,
};
use kbsearch_domain::cicd::{CacheReport, QueryFailure, QueryResponse};
use kbsearch_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::{PROTOCOL_ERROR, ToolError, ToolResult},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Tool name constants
pub const QUERY_CICD_PREPARE: &str = "query_cicd_prepare";
pub const QUERY_CICD_EXECUTE: &str = "query_cicd_execute";
pub const QUERY_CICD_CACHE_STATS: &str = "query_cicd_cache_stats";
pub const QUERY_CICD_CACHE_LIST: &str = "query_cicd_cache_list";

static ALIASES: [(&str, &str); 1] = [("query_ci_data", QUERY_CICD_PREPARE)];

/// Get the tool definition for query_cicd_prepare
pub fn prepare_definition() -> ToolDefinition {
    ToolDefinition::new(
        QUERY_CICD_PREPARE,
        "Prepare a CI/CD database query from natural language.

⚠️ STEP 1 of 2 for querying the CI/CD database (deployments, test runs).

What it does:
- Extracts the query parameters (application, environment, time range)
- Returns results immediately when this query pattern is already cached
- Otherwise returns the database schema, an instruction and a cache_key

If status=\"ACTION_REQUIRED\" the question is NOT answered yet. You MUST:
1. Write SQL following the returned instruction
2. Immediately call query_cicd_execute with that SQL and the cache_key, unchanged
Never show the instruction or unexecuted SQL to the user as an answer.

Example questions:
- \"What was the last deployment for frontend to prod?\"
- \"Show me failures in the last week\"
- \"How many tests ran for api-gateway today?\"

When status=\"success\", show the `formatted` field to the user as-is.",
    )
    .with_parameter(ToolParameter::new(
        "question",
        "Natural language question about CI/CD data",
        true,
    ))
}

/// Get the tool definition for query_cicd_execute
pub fn execute_definition() -> ToolDefinition {
    ToolDefinition::new(
        QUERY_CICD_EXECUTE,
        "Execute SQL you generated against the CI/CD database.

⚠️ STEP 2 of 2. Required after query_cicd_prepare returned status=\"ACTION_REQUIRED\".

Pass the SQL written from the prepare instruction together with the exact cache_key it returned. With confirm_cache=true the SQL pattern is cached so that similar questions are answered instantly next time.

Returns status=\"success\" with a `formatted` block to show the user, or status=\"error\" with the database error and the SQL that was run; review and fix the SQL before retrying.",
    )
    .with_parameter(ToolParameter::new("sql", "The SQL query to execute", true))
    .with_parameter(ToolParameter::new(
        "cache_key",
        "cache_key returned by query_cicd_prepare",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "confirm_cache",
            "Cache this SQL pattern for future queries",
            false,
        )
        .with_type("boolean")
        .with_default(true),
    )
}

/// Get the tool definition for query_cicd_cache_stats
pub fn cache_stats_definition() -> ToolDefinition {
    ToolDefinition::new(
        QUERY_CICD_CACHE_STATS,
        "Get statistics about cached CI/CD queries: number of cached patterns, total cache hits, the most used queries and how many users share the cache.",
    )
}

/// Get the tool definition for query_cicd_cache_list
pub fn cache_list_definition(default_limit: i64) -> ToolDefinition {
    ToolDefinition::new(
        QUERY_CICD_CACHE_LIST,
        "List cached CI/CD query patterns with their cache key, creation time, last use, use count and creator.",
    )
    .with_parameter(
        ToolParameter::new("limit", "Maximum number of entries to return", false)
            .with_type("integer")
            .with_default(default_limit),
    )
}

/// Provider for the CI/CD tool group
///
/// The query tools and the cache introspection tools can be toggled
/// independently.
#[derive(Clone)]
pub struct CicdToolProvider {
    query: QueryCicdUseCase,
    cache: CacheInspectionUseCase,
    cache_list_limit: i64,
    query_enabled: bool,
    cache_enabled: bool,
}

impl CicdToolProvider {
    pub fn new(
        service: Arc<dyn Nl2SqlService>,
        identity: CallerIdentity,
        options: &AdapterOptions,
    ) -> Self {
        Self {
            query: QueryCicdUseCase::new(service.clone(), identity).with_rich_ui(options.rich_ui),
            cache: CacheInspectionUseCase::new(service)
                .with_default_limit(options.cache_list_limit)
                .with_rich_ui(options.rich_ui),
            cache_list_limit: options.cache_list_limit,
            query_enabled: true,
            cache_enabled: true,
        }
    }

    pub fn with_query_tools(mut self, enabled: bool) -> Self {
        self.query_enabled = enabled;
        self
    }

    pub fn with_cache_tools(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        let mut tools = Vec::new();
        if self.query_enabled {
            tools.push(prepare_definition());
            tools.push(execute_definition());
        }
        if self.cache_enabled {
            tools.push(cache_stats_definition());
            tools.push(cache_list_definition(self.cache_list_limit));
        }
        tools
    }

    async fn run(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let result = match call.tool_name.as_str() {
            QUERY_CICD_PREPARE if self.query_enabled => {
                let question = call
                    .require_string("question")
                    .map_err(ToolError::invalid_argument)?;
                query_result(&call.tool_name, self.query.prepare(question).await)
            }
            QUERY_CICD_EXECUTE if self.query_enabled => {
                let sql = call.require_string("sql").map_err(ToolError::invalid_argument)?;
                let cache_key = call
                    .require_string("cache_key")
                    .map_err(ToolError::invalid_argument)?;
                let input = ExecuteSqlInput::new(sql, cache_key)
                    .with_confirm_cache(call.get_bool("confirm_cache").unwrap_or(true));
                query_result(&call.tool_name, self.query.execute(input).await)
            }
            QUERY_CICD_CACHE_STATS if self.cache_enabled => {
                cache_result(&call.tool_name, self.cache.stats().await)
            }
            QUERY_CICD_CACHE_LIST if self.cache_enabled => cache_result(
                &call.tool_name,
                self.cache.list(call.get_i64("limit")).await,
            ),
            other => return Err(ToolError::not_found(format!("Tool not found: {}", other))),
        };
        Ok(result)
    }
}

fn query_result(tool: &str, response: QueryResponse) -> ToolResult {
    let failure = match &response {
        QueryResponse::Error(failure) => Some(failure_error(failure)),
        _ => None,
    };
    payload_result(tool, &response, failure)
}

fn cache_result(tool: &str, report: CacheReport) -> ToolResult {
    let failure = match &report {
        CacheReport::Error(failure) => Some(failure_error(failure)),
        CacheReport::Success(_) => None,
    };
    payload_result(tool, &report, failure)
}

fn failure_error(failure: &QueryFailure) -> ToolError {
    ToolError::new(&failure.error_kind, &failure.error).with_optional_details(failure.details.clone())
}

/// Wrap a status payload as a tool result. The pretty-printed payload is the
/// text output in both the success and the failure case.
fn payload_result<T: Serialize>(tool: &str, payload: &T, failure: Option<ToolError>) -> ToolResult {
    let (value, text) = match serde_json::to_value(payload)
        .and_then(|value| serde_json::to_string_pretty(&value).map(|text| (value, text)))
    {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(tool, error = %e, "Failed to encode tool payload");
            return ToolResult::failure(
                tool,
                ToolError::new(PROTOCOL_ERROR, format!("Failed to encode response: {}", e)),
            );
        }
    };

    let result = match failure {
        None => ToolResult::success(tool, text),
        Some(error) => {
            let mut result = ToolResult::failure(tool, error);
            result.output = Some(text);
            result
        }
    };
    result.with_structured(value)
}

#[async_trait]
impl ToolProvider for CicdToolProvider {
    fn id(&self) -> &str {
        "cicd"
    }

    fn display_name(&self) -> &str {
        "CI/CD Database"
    }

    async fn is_available(&self) -> bool {
        self.query_enabled || self.cache_enabled
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        Ok(self.definitions())
    }

    fn aliases(&self) -> &[(&'static str, &'static str)] {
        if self.query_enabled { &ALIASES[..] } else { &[] }
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let result = match self.run(call).await {
            Ok(result) => result,
            Err(e) => ToolResult::failure(&call.tool_name, e),
        };
        result.with_duration(start.elapsed().as_millis() as u64)
    }
}
