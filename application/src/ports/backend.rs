//! Transport-level failures reported by backend adapters

use thiserror::Error;

/// How a call to an external backend failed
///
/// Adapters classify their client library's errors into these variants;
/// use cases turn them into agent-facing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No response within the configured bound
    #[error("request timed out")]
    Timeout,

    /// The backend could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP {status}")]
    Http { status: u16, detail: Option<String> },

    /// Any other request failure
    #[error("{0}")]
    Transport(String),

    /// The body could not be decoded
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout)
    }
}
