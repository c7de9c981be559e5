//! Retrieval backend configuration from TOML (`[retrieval]` section)
//!
//! ```toml
//! [retrieval]
//! search_url = "http://rag.internal:8000/search"
//! feedback_url = "http://rag.internal:8000/feedback"
//! timeout_secs = 5
//! default_top_k = 5
//! ```

use serde::{Deserialize, Serialize};

/// Raw retrieval configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Search endpoint (POST)
    pub search_url: String,
    /// Feedback endpoint (POST)
    pub feedback_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Chunks requested when the caller omits `top_k`
    pub default_top_k: i64,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            search_url: "http://localhost:8000/search".to_string(),
            feedback_url: "http://localhost:8000/feedback".to_string(),
            timeout_secs: 5,
            default_top_k: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_partial_override() {
        let toml_str = r#"
[retrieval]
search_url = "http://rag:9000/search"
timeout_secs = 10
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.search_url, "http://rag:9000/search");
        assert_eq!(config.retrieval.timeout_secs, 10);
        assert_eq!(config.retrieval.feedback_url, "http://localhost:8000/feedback");
        assert_eq!(config.retrieval.default_top_k, 5);
    }
}
