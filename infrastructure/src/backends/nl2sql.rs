//! NL2SQL backend over HTTP

use super::http::{ClientBuildError, JsonClient};
use crate::config::FileNl2SqlConfig;
use async_trait::async_trait;
use kbsearch_application::{BackendError, Nl2SqlService};
use kbsearch_domain::cicd::{ExecuteRequest, ExecuteResponse, PrepareRequest, PrepareResponse};
use std::time::Duration;
use tracing::debug;

/// [`Nl2SqlService`] backed by the NL2SQL service.
///
/// Cache introspection lives under `{cache_base_url}/cache/`.
#[derive(Debug, Clone)]
pub struct HttpNl2SqlBackend {
    http: JsonClient,
    prepare_url: String,
    execute_url: String,
    cache_base_url: String,
}

impl HttpNl2SqlBackend {
    pub fn new(config: &FileNl2SqlConfig) -> Result<Self, ClientBuildError> {
        let http = JsonClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: JsonClient, config: &FileNl2SqlConfig) -> Self {
        Self {
            http,
            prepare_url: config.prepare_url.clone(),
            execute_url: config.execute_url.clone(),
            cache_base_url: config.resolved_cache_base_url(),
        }
    }

    fn cache_url(&self, endpoint: &str) -> String {
        format!("{}/cache/{}", self.cache_base_url, endpoint)
    }
}

#[async_trait]
impl Nl2SqlService for HttpNl2SqlBackend {
    async fn prepare(&self, request: &PrepareRequest) -> Result<PrepareResponse, BackendError> {
        let response: PrepareResponse = self.http.post_json(&self.prepare_url, request).await?;
        debug!(status = ?response.status, "Prepare answered");
        Ok(response)
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, BackendError> {
        let response: ExecuteResponse = self.http.post_json(&self.execute_url, request).await?;
        debug!(status = ?response.status, cached = ?response.cached, "Execute answered");
        Ok(response)
    }

    async fn cache_stats(&self) -> Result<serde_json::Value, BackendError> {
        self.http.get_json(&self.cache_url("stats"), &[]).await
    }

    async fn cache_list(&self, limit: i64) -> Result<serde_json::Value, BackendError> {
        self.http
            .get_json(&self.cache_url("list"), &[("limit", limit.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::http::test_server::{hang, respond_once};
    use serde_json::json;

    fn config(base: &str) -> FileNl2SqlConfig {
        FileNl2SqlConfig {
            prepare_url: format!("{}/prepare", base),
            execute_url: format!("{}/execute", base),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_prepare_carries_user_id() {
        let (base, server) = respond_once(
            200,
            r#"{"status": "needs_generation", "cache_key": "k1", "instruction": "schema..."}"#,
        )
        .await;
        let backend = HttpNl2SqlBackend::new(&config(&base)).unwrap();

        let response = backend
            .prepare(&PrepareRequest {
                query: "failed deploys today".into(),
                user_id: "alice".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.status.as_deref(), Some("needs_generation"));
        assert_eq!(response.cache_key.as_deref(), Some("k1"));

        assert_eq!(
            server.await.unwrap().json(),
            json!({"query": "failed deploys today", "user_id": "alice"})
        );
    }

    #[tokio::test]
    async fn test_execute_forwards_cache_key_unchanged() {
        let (base, server) = respond_once(200, r#"{"status": "success", "results": [], "cached": true}"#).await;
        let backend = HttpNl2SqlBackend::new(&config(&base)).unwrap();

        let key = "deploy:app=frontend|range=7d";
        backend
            .execute(&ExecuteRequest {
                sql: "SELECT 1".into(),
                cache_key: key.into(),
                confirm_cache: false,
                user_id: "alice".into(),
            })
            .await
            .unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.request_line, "POST /execute HTTP/1.1");
        assert_eq!(captured.json()["cache_key"], key);
        assert_eq!(captured.json()["confirm_cache"], false);
    }

    #[tokio::test]
    async fn test_cache_endpoints_derive_from_prepare_url() {
        let (base, server) = respond_once(200, r#"{"cached_queries": []}"#).await;
        let backend = HttpNl2SqlBackend::new(&config(&base)).unwrap();

        let body = backend.cache_list(25).await.unwrap();
        assert_eq!(body, json!({"cached_queries": []}));
        assert_eq!(
            server.await.unwrap().request_line,
            "GET /cache/list?limit=25 HTTP/1.1"
        );

        let (base, server) = respond_once(200, r#"{"total_entries": 0}"#).await;
        let backend = HttpNl2SqlBackend::new(&config(&base)).unwrap();
        backend.cache_stats().await.unwrap();
        assert_eq!(
            server.await.unwrap().request_line,
            "GET /cache/stats HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_prepare_timeout() {
        let (base, _server) = hang().await;
        let http = JsonClient::new(Duration::from_millis(200)).unwrap();
        let backend = HttpNl2SqlBackend::with_client(http, &config(&base));

        let error = backend
            .prepare(&PrepareRequest {
                query: "q".into(),
                user_id: "u".into(),
            })
            .await
            .unwrap_err();
        assert!(error.is_timeout());
    }
}
