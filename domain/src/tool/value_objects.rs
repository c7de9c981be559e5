//! Tool domain value objects: immutable result and error types
//!
//! Every tool invocation produces a [`ToolResult`]. Failures never escape as
//! panics or propagated errors: they are recovered into a [`ToolError`] whose
//! `code` tells the calling agent what kind of failure occurred.
//!
//! | Code | Meaning |
//! |------|---------|
//! | `TIMEOUT` | Backend did not answer within the configured bound; retrying may help |
//! | `CONNECTION_FAILED` | Backend unreachable; the service may be down |
//! | `HTTP_ERROR` | Backend answered with a non-2xx status |
//! | `TRANSPORT_ERROR` | Any other request failure |
//! | `INVALID_RESPONSE` | Backend body could not be decoded |
//! | `BACKEND_ERROR` | Backend reported an application-level error in a 2xx body |
//! | `PROTOCOL_ERROR` | Backend reported a status value this adapter does not know |
//! | `INVALID_ARGUMENT` | Caller supplied missing or malformed arguments |
//! | `NOT_FOUND` | Unknown tool |

use serde::{Deserialize, Serialize};

pub const TIMEOUT: &str = "TIMEOUT";
pub const CONNECTION_FAILED: &str = "CONNECTION_FAILED";
pub const HTTP_ERROR: &str = "HTTP_ERROR";
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
pub const PROTOCOL_ERROR: &str = "PROTOCOL_ERROR";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "TIMEOUT", "HTTP_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_optional_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(NOT_FOUND, format!("Resource not found: {}", resource.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(INVALID_ARGUMENT, message)
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(BACKEND_ERROR, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(PROTOCOL_ERROR, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.code == TIMEOUT
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
///
/// `output` is the text the calling agent reads. `structured` carries the
/// JSON payload for tools whose contract is a structured object (the CI/CD
/// query tools always fill it, including on failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Structured payload, when the tool returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<serde_json::Value>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of rows or chunks returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            structured: None,
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            structured: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Attach a structured payload
    pub fn with_structured(mut self, structured: serde_json::Value) -> Self {
        self.structured = Some(structured);
        self
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    /// Add match count metadata
    pub fn with_match_count(mut self, count: usize) -> Self {
        self.metadata.match_count = Some(count);
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the output content
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text shown to the agent: the output on success, the error message otherwise.
    pub fn display_text(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => match &error.details {
                Some(details) => format!("Error: {}\n\nDetails: {}", error.message, details),
                None => format!("Error: {}", error.message),
            },
            (None, None) => String::new(),
        }
    }
}
