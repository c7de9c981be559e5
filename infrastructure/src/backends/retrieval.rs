//! Retrieval (RAG) backend over HTTP

use super::http::{ClientBuildError, JsonClient};
use crate::config::FileRetrievalConfig;
use async_trait::async_trait;
use kbsearch_application::{BackendError, RetrievalService};
use kbsearch_domain::retrieval::{FeedbackRequest, FeedbackResponse, SearchRequest, SearchResponse};
use std::time::Duration;
use tracing::debug;

/// [`RetrievalService`] backed by the RAG service's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpRetrievalBackend {
    http: JsonClient,
    search_url: String,
    feedback_url: String,
}

impl HttpRetrievalBackend {
    pub fn new(config: &FileRetrievalConfig) -> Result<Self, ClientBuildError> {
        let http = JsonClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: JsonClient, config: &FileRetrievalConfig) -> Self {
        Self {
            http,
            search_url: config.search_url.clone(),
            feedback_url: config.feedback_url.clone(),
        }
    }
}

#[async_trait]
impl RetrievalService for HttpRetrievalBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        let response: SearchResponse = self.http.post_json(&self.search_url, request).await?;
        debug!(chunks = response.chunks.len(), "Retrieval search answered");
        Ok(response)
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError> {
        self.http.post_json(&self.feedback_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::http::test_server::{closed_port, respond_once};
    use serde_json::json;

    fn config(base: &str) -> FileRetrievalConfig {
        FileRetrievalConfig {
            search_url: format!("{}/search", base),
            feedback_url: format!("{}/feedback", base),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_request_and_response() {
        let (base, server) = respond_once(
            200,
            r#"{"chunks": [{"citation": "[1]", "title": "Runbook", "content": "Step 1", "score": 0.5}],
                "metrics": {"latency_ms": 42.0}, "query_id": "q-1"}"#,
        )
        .await;
        let backend = HttpRetrievalBackend::new(&config(&base)).unwrap();

        let response = backend
            .search(&SearchRequest::new("deploy", 3).with_profile(Some("ops".into())))
            .await
            .unwrap();
        assert_eq!(response.chunks.len(), 1);
        assert_eq!(response.query_id.as_deref(), Some("q-1"));

        let captured = server.await.unwrap();
        assert_eq!(captured.request_line, "POST /search HTTP/1.1");
        assert_eq!(
            captured.json(),
            json!({"query": "deploy", "top_k": 3, "retrieve_only": true, "profile": "ops"})
        );
    }

    #[tokio::test]
    async fn test_feedback_posts_to_feedback_url() {
        let (base, server) = respond_once(200, r#"{"status": "success"}"#).await;
        let backend = HttpRetrievalBackend::new(&config(&base)).unwrap();

        let response = backend
            .submit_feedback(&FeedbackRequest {
                query_id: "q-1".into(),
                score: -1,
                comment: None,
            })
            .await
            .unwrap();
        assert!(!response.is_error());

        let captured = server.await.unwrap();
        assert_eq!(captured.request_line, "POST /feedback HTTP/1.1");
        assert_eq!(
            captured.json(),
            json!({"query_id": "q-1", "score": -1, "comment": null})
        );
    }

    #[tokio::test]
    async fn test_search_unreachable() {
        let base = closed_port().await;
        let backend = HttpRetrievalBackend::new(&config(&base)).unwrap();

        let error = backend
            .search(&SearchRequest::new("deploy", 5))
            .await
            .unwrap_err();
        assert!(matches!(error, BackendError::Connection(_)));
    }
}
