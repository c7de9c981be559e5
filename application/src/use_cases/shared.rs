//! Shared utilities for use cases.
//!
//! Contains the translation of [`BackendError`] into agent-facing
//! [`ToolError`]s and argument checks used by every adapter.

use crate::ports::backend::BackendError;
use kbsearch_domain::tool::value_objects::{
    CONNECTION_FAILED, HTTP_ERROR, INVALID_RESPONSE, TIMEOUT, TRANSPORT_ERROR, ToolError,
};
use kbsearch_domain::util::is_blank;

/// Wording of translated errors for one backend operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ErrorContext {
    /// Service name as it appears mid-sentence ("knowledge base")
    pub service: &'static str,
    /// Full message for a timeout
    pub timeout: &'static str,
    /// Prefix for catch-all transport failures ("Error executing SQL")
    pub failure_prefix: &'static str,
}

pub(crate) const SEARCH: ErrorContext = ErrorContext {
    service: "knowledge base",
    timeout: "Knowledge base search timed out. Please try again.",
    failure_prefix: "Error searching knowledge base",
};

pub(crate) const FEEDBACK: ErrorContext = ErrorContext {
    service: "knowledge base",
    timeout: "Feedback submission timed out. Please try again.",
    failure_prefix: "Error submitting feedback",
};

pub(crate) const PREPARE: ErrorContext = ErrorContext {
    service: "CI/CD database",
    timeout: "CI/CD database query preparation timed out. Please try again.",
    failure_prefix: "Error preparing CI/CD query",
};

pub(crate) const EXECUTE: ErrorContext = ErrorContext {
    service: "CI/CD database",
    timeout: "SQL execution timed out. Query may be too complex.",
    failure_prefix: "Error executing SQL",
};

pub(crate) const CACHE_STATS: ErrorContext = ErrorContext {
    service: "CI/CD database",
    timeout: "Cache statistics request timed out. Please try again.",
    failure_prefix: "Failed to fetch cache stats",
};

pub(crate) const CACHE_LIST: ErrorContext = ErrorContext {
    service: "CI/CD database",
    timeout: "Cache listing request timed out. Please try again.",
    failure_prefix: "Failed to list cache",
};

/// Translate a transport failure into the error the agent sees.
pub(crate) fn translate(error: &BackendError, context: ErrorContext) -> ToolError {
    match error {
        BackendError::Timeout => ToolError::new(TIMEOUT, context.timeout),
        BackendError::Connection(reason) => ToolError::new(
            CONNECTION_FAILED,
            format!(
                "Could not connect to {} service. Service may be down.",
                context.service
            ),
        )
        .with_details(reason.clone()),
        BackendError::Http { status, detail } => ToolError::new(
            HTTP_ERROR,
            format!(
                "{} service returned an error: {}",
                capitalize(context.service),
                status
            ),
        )
        .with_optional_details(detail.clone()),
        BackendError::Transport(reason) => ToolError::new(
            TRANSPORT_ERROR,
            format!("{}: {}", context.failure_prefix, reason),
        ),
        BackendError::InvalidResponse(reason) => ToolError::new(
            INVALID_RESPONSE,
            format!(
                "{} service returned an unreadable response.",
                capitalize(context.service)
            ),
        )
        .with_details(reason.clone()),
    }
}

/// Reject empty or whitespace-only required arguments.
pub(crate) fn require_non_empty(value: &str, name: &str) -> Result<(), ToolError> {
    if is_blank(value) {
        return Err(ToolError::invalid_argument(format!(
            "'{}' must not be empty",
            name
        )));
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_not_connection_failure() {
        let error = translate(&BackendError::Timeout, PREPARE);
        assert_eq!(error.code, TIMEOUT);
        assert_eq!(
            error.message,
            "CI/CD database query preparation timed out. Please try again."
        );
    }

    #[test]
    fn test_connection_message() {
        let error = translate(&BackendError::Connection("refused".into()), SEARCH);
        assert_eq!(error.code, CONNECTION_FAILED);
        assert_eq!(
            error.message,
            "Could not connect to knowledge base service. Service may be down."
        );
        assert_eq!(error.details.as_deref(), Some("refused"));
    }

    #[test]
    fn test_http_message_with_detail() {
        let error = translate(
            &BackendError::Http {
                status: 503,
                detail: Some("index rebuilding".into()),
            },
            SEARCH,
        );
        assert_eq!(error.code, HTTP_ERROR);
        assert_eq!(error.message, "Knowledge base service returned an error: 503");
        assert_eq!(error.details.as_deref(), Some("index rebuilding"));

        let error = translate(
            &BackendError::Http {
                status: 500,
                detail: None,
            },
            EXECUTE,
        );
        assert_eq!(error.message, "CI/CD database service returned an error: 500");
        assert!(error.details.is_none());
    }

    #[test]
    fn test_transport_and_invalid_response() {
        let error = translate(&BackendError::Transport("redirect loop".into()), EXECUTE);
        assert_eq!(error.code, TRANSPORT_ERROR);
        assert_eq!(error.message, "Error executing SQL: redirect loop");

        let error = translate(&BackendError::InvalidResponse("expected value".into()), CACHE_LIST);
        assert_eq!(error.code, INVALID_RESPONSE);
        assert_eq!(error.details.as_deref(), Some("expected value"));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("SELECT 1", "sql").is_ok());
        let error = require_non_empty("   ", "cache_key").unwrap_err();
        assert_eq!(error.message, "'cache_key' must not be empty");
    }
}
