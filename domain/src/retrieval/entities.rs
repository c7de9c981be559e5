//! Wire types exchanged with the retrieval backend

use serde::{Deserialize, Serialize};

/// Body of a search request
///
/// `retrieve_only` is always `true`: the backend returns ranked chunks and
/// the calling agent writes the final answer itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: i64,
    pub retrieve_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: i64) -> Self {
        Self {
            query: query.into(),
            top_k,
            retrieve_only: true,
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }
}

/// A retrieved passage with citation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    #[serde(default)]
    pub citation: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMetrics {
    #[serde(default)]
    pub latency_ms: Option<f64>,
}

/// Body of a search response. Chunk order is the backend's ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub chunks: Vec<RetrievedChunk>,
    #[serde(default)]
    pub metrics: SearchMetrics,
    #[serde(default)]
    pub query_id: Option<String>,
}

/// Body of a feedback submission
///
/// `comment` is sent as an explicit `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub query_id: String,
    pub score: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FeedbackResponse {
    /// The backend signals rejection with `status: "error"` in a 2xx body.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}
