//! In-memory port implementations for use case tests.
//!
//! Each mock returns a canned result and records the requests it receives.

use crate::ports::backend::BackendError;
use crate::ports::nl2sql_service::Nl2SqlService;
use crate::ports::retrieval_service::RetrievalService;
use async_trait::async_trait;
use kbsearch_domain::cicd::{ExecuteRequest, ExecuteResponse, PrepareRequest, PrepareResponse};
use kbsearch_domain::retrieval::{
    FeedbackRequest, FeedbackResponse, SearchRequest, SearchResponse,
};
use std::sync::Mutex;

pub(crate) struct MockRetrieval {
    search_result: Result<SearchResponse, BackendError>,
    feedback_result: Result<FeedbackResponse, BackendError>,
    pub searches: Mutex<Vec<SearchRequest>>,
    pub feedbacks: Mutex<Vec<FeedbackRequest>>,
}

impl MockRetrieval {
    pub fn new() -> Self {
        Self {
            search_result: Ok(SearchResponse::default()),
            feedback_result: Ok(FeedbackResponse::default()),
            searches: Mutex::new(Vec::new()),
            feedbacks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search(mut self, result: Result<SearchResponse, BackendError>) -> Self {
        self.search_result = result;
        self
    }

    pub fn with_feedback(mut self, result: Result<FeedbackResponse, BackendError>) -> Self {
        self.feedback_result = result;
        self
    }
}

#[async_trait]
impl RetrievalService for MockRetrieval {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, BackendError> {
        self.searches.lock().unwrap().push(request.clone());
        self.search_result.clone()
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, BackendError> {
        self.feedbacks.lock().unwrap().push(request.clone());
        self.feedback_result.clone()
    }
}

pub(crate) struct MockNl2Sql {
    prepare_result: Result<PrepareResponse, BackendError>,
    execute_result: Result<ExecuteResponse, BackendError>,
    cache_result: Result<serde_json::Value, BackendError>,
    pub prepares: Mutex<Vec<PrepareRequest>>,
    pub executes: Mutex<Vec<ExecuteRequest>>,
    pub list_limits: Mutex<Vec<i64>>,
}

impl MockNl2Sql {
    pub fn new() -> Self {
        Self {
            prepare_result: Ok(PrepareResponse::default()),
            execute_result: Ok(ExecuteResponse::default()),
            cache_result: Ok(serde_json::json!({})),
            prepares: Mutex::new(Vec::new()),
            executes: Mutex::new(Vec::new()),
            list_limits: Mutex::new(Vec::new()),
        }
    }

    /// Canned prepare response decoded from a backend body
    pub fn with_prepare_body(mut self, body: serde_json::Value) -> Self {
        self.prepare_result = Ok(serde_json::from_value(body).unwrap());
        self
    }

    pub fn with_prepare_error(mut self, error: BackendError) -> Self {
        self.prepare_result = Err(error);
        self
    }

    pub fn with_execute_body(mut self, body: serde_json::Value) -> Self {
        self.execute_result = Ok(serde_json::from_value(body).unwrap());
        self
    }

    pub fn with_execute_error(mut self, error: BackendError) -> Self {
        self.execute_result = Err(error);
        self
    }

    pub fn with_cache_result(mut self, result: Result<serde_json::Value, BackendError>) -> Self {
        self.cache_result = result;
        self
    }
}

#[async_trait]
impl Nl2SqlService for MockNl2Sql {
    async fn prepare(&self, request: &PrepareRequest) -> Result<PrepareResponse, BackendError> {
        self.prepares.lock().unwrap().push(request.clone());
        self.prepare_result.clone()
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, BackendError> {
        self.executes.lock().unwrap().push(request.clone());
        self.execute_result.clone()
    }

    async fn cache_stats(&self) -> Result<serde_json::Value, BackendError> {
        self.cache_result.clone()
    }

    async fn cache_list(&self, limit: i64) -> Result<serde_json::Value, BackendError> {
        self.list_limits.lock().unwrap().push(limit);
        self.cache_result.clone()
    }
}
