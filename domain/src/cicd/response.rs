//! Agent-facing payloads of the two-phase CI/CD query protocol
//!
//! ```text
//!  prepare(question) ──┬─ success ──────────────▶ QuerySuccess   (done)
//!                      ├─ needs_generation ─────▶ ActionRequired (agent writes SQL)
//!                      └─ error / other ────────▶ QueryFailure
//!
//!  execute(sql, cache_key) ─┬─ success ─────────▶ QuerySuccess   (same shape)
//!                           └─ error / other ───▶ QueryFailure
//! ```
//!
//! The `cache_key` is the only state carried between the two calls and is
//! passed through untouched.

use serde::Serialize;

use super::format::format_results;
use super::protocol::Row;
use super::rows::{ResultKind, ResultSet};
use super::summary::ResultSummary;
use super::ui::{UiComponent, render_results};
use crate::tool::ToolError;

pub const EXECUTE_SQL_ACTION: &str = "EXECUTE_SQL";
pub const INCOMPLETE_MARKER: &str = "⚠️ INCOMPLETE - SQL not executed yet";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum QueryResponse {
    #[serde(rename = "success")]
    Success(QuerySuccess),
    #[serde(rename = "ACTION_REQUIRED")]
    ActionRequired(ActionRequired),
    #[serde(rename = "error")]
    Error(QueryFailure),
}

impl QueryResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, QueryResponse::Error(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            QueryResponse::Success(_) => "success",
            QueryResponse::ActionRequired(_) => "ACTION_REQUIRED",
            QueryResponse::Error(_) => "error",
        }
    }
}

impl From<QueryFailure> for QueryResponse {
    fn from(failure: QueryFailure) -> Self {
        QueryResponse::Error(failure)
    }
}

/// Results ready for display, whichever phase produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySuccess {
    pub cached: bool,
    pub result_type: ResultKind,
    pub results: Vec<Row>,
    pub row_count: u64,
    pub sql: Option<String>,
    pub cache_key: Option<String>,
    pub summary: ResultSummary,
    pub formatted: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiComponent>,
}

impl QuerySuccess {
    /// Classify, summarize and render `results`.
    ///
    /// `row_count` falls back to the number of rows when the backend omits it.
    pub fn new(results: Vec<Row>, row_count: Option<u64>, sql: Option<String>) -> Self {
        let set = ResultSet::classify(&results);
        let summary = ResultSummary::of(&set);
        let formatted = format_results(&set, &summary);
        Self {
            cached: false,
            result_type: set.kind(),
            row_count: row_count.unwrap_or(results.len() as u64),
            results,
            sql,
            cache_key: None,
            summary,
            formatted,
            message: String::new(),
            ui: None,
        }
    }

    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    pub fn with_cache_key(mut self, cache_key: Option<String>) -> Self {
        self.cache_key = cache_key;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the rich-UI tree, optionally under a banner `(title, message)`.
    pub fn with_ui(mut self, banner: Option<(&str, String)>) -> Self {
        let set = ResultSet::classify(&self.results);
        let tree = render_results(&set, &self.summary, self.sql.as_deref());
        self.ui = Some(match banner {
            Some((title, message)) => tree.with_banner(title, message),
            None => tree,
        });
        self
    }
}

/// The agent must generate SQL and call the execute tool before answering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequired {
    pub action: String,
    pub cached: bool,
    pub cache_key: String,
    pub instruction: String,
    pub error: String,
    pub message: String,
}

impl ActionRequired {
    pub fn new(cache_key: impl Into<String>, instruction: impl Into<String>) -> Self {
        let cache_key = cache_key.into();
        let instruction = instruction.into();
        let message = format!(
            "❌ Query NOT complete - Action required!\n\
             \n\
             📋 REQUIRED NEXT STEPS:\n\
             1. Generate SQL using the instruction below\n\
             2. Call query_cicd_execute(sql=\"YOUR_SQL\", cache_key=\"{key}\", confirm_cache=true)\n\
             3. Return those results to the user\n\
             \n\
             ⚠️ DO NOT show SQL to user without executing it first!\n\
             \n\
             📝 SQL Generation Instruction:\n\
             {instruction}\n\
             \n\
             🔧 Example call:\n\
             query_cicd_execute(\n    \
             sql=\"SELECT * FROM deployment_data WHERE deploy_env='PROD' ORDER BY date DESC LIMIT 3\",\n    \
             cache_key=\"{key}\",\n    \
             confirm_cache=true\n\
             )",
            key = cache_key,
            instruction = instruction
        );
        Self {
            action: EXECUTE_SQL_ACTION.to_string(),
            cached: false,
            cache_key,
            instruction,
            error: INCOMPLETE_MARKER.to_string(),
            message,
        }
    }
}

/// A failure of either phase, or of the transport underneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFailure {
    pub error: String,
    /// One of the tool error codes (`TIMEOUT`, `BACKEND_ERROR`, ...)
    pub error_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl QueryFailure {
    pub fn new(kind: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_kind: kind.into(),
            details: None,
            warnings: Vec::new(),
            suggestions: Vec::new(),
            sql: None,
            error_type: None,
        }
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn with_error_type(mut self, error_type: Option<String>) -> Self {
        self.error_type = error_type;
        self
    }
}

impl From<ToolError> for QueryFailure {
    fn from(error: ToolError) -> Self {
        QueryFailure::new(error.code, error.message).with_details(error.details)
    }
}
