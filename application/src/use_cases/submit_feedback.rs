//! Submit Feedback use case.
//!
//! Records relevance feedback for a previous search, identified by the
//! query id that search returned. The score is not range-checked here.

use crate::ports::retrieval_service::RetrievalService;
use crate::use_cases::shared::{FEEDBACK, require_non_empty, translate};
use kbsearch_domain::retrieval::FeedbackRequest;
use kbsearch_domain::tool::ToolError;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SubmitFeedbackInput {
    pub query_id: String,
    pub score: i64,
    pub comment: Option<String>,
}

impl SubmitFeedbackInput {
    pub fn new(query_id: impl Into<String>, score: i64) -> Self {
        Self {
            query_id: query_id.into(),
            score,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }
}

#[derive(Clone)]
pub struct SubmitFeedbackUseCase {
    service: Arc<dyn RetrievalService>,
}

impl SubmitFeedbackUseCase {
    pub fn new(service: Arc<dyn RetrievalService>) -> Self {
        Self { service }
    }

    pub async fn execute(&self, input: SubmitFeedbackInput) -> Result<String, ToolError> {
        require_non_empty(&input.query_id, "query_id")?;

        let request = FeedbackRequest {
            query_id: input.query_id,
            score: input.score,
            comment: input.comment,
        };
        info!(query_id = %request.query_id, score = request.score, "Submitting feedback");

        let response = self.service.submit_feedback(&request).await.map_err(|e| {
            warn!(error = %e, "Feedback submission failed");
            translate(&e, FEEDBACK)
        })?;

        if response.is_error() {
            let message = response
                .message
                .unwrap_or_else(|| "Feedback submission failed".to_string());
            warn!(query_id = %request.query_id, "Backend rejected feedback: {}", message);
            return Err(ToolError::backend(message));
        }

        let mut confirmation = format!(
            "Feedback recorded for query {} (score: {}).",
            request.query_id, request.score
        );
        if let Some(message) = response.message.filter(|m| !m.is_empty()) {
            confirmation.push(' ');
            confirmation.push_str(&message);
        }
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend::BackendError;
    use crate::use_cases::mocks::MockRetrieval;
    use kbsearch_domain::retrieval::FeedbackResponse;
    use kbsearch_domain::tool::value_objects::{BACKEND_ERROR, HTTP_ERROR, INVALID_ARGUMENT};

    #[tokio::test]
    async fn test_feedback_confirmation() {
        let mock = Arc::new(MockRetrieval::new().with_feedback(Ok(FeedbackResponse {
            status: Some("success".into()),
            message: Some("Thanks!".into()),
        })));
        let use_case = SubmitFeedbackUseCase::new(mock.clone());

        let text = use_case
            .execute(SubmitFeedbackInput::new("q-7", 1).with_comment(Some("helpful".into())))
            .await
            .unwrap();
        assert_eq!(text, "Feedback recorded for query q-7 (score: 1). Thanks!");

        let sent = mock.feedbacks.lock().unwrap();
        assert_eq!(sent[0].comment.as_deref(), Some("helpful"));
    }

    #[tokio::test]
    async fn test_out_of_range_score_passed_through() {
        let mock = Arc::new(MockRetrieval::new());
        let use_case = SubmitFeedbackUseCase::new(mock.clone());

        let text = use_case
            .execute(SubmitFeedbackInput::new("q-7", 42))
            .await
            .unwrap();
        assert_eq!(text, "Feedback recorded for query q-7 (score: 42).");
        assert_eq!(mock.feedbacks.lock().unwrap()[0].score, 42);
    }

    #[tokio::test]
    async fn test_backend_reported_error() {
        let use_case = SubmitFeedbackUseCase::new(Arc::new(MockRetrieval::new().with_feedback(
            Ok(FeedbackResponse {
                status: Some("error".into()),
                message: Some("Unknown query_id".into()),
            }),
        )));
        let error = use_case
            .execute(SubmitFeedbackInput::new("nope", 1))
            .await
            .unwrap_err();
        assert_eq!(error.code, BACKEND_ERROR);
        assert_eq!(error.message, "Unknown query_id");
    }

    #[tokio::test]
    async fn test_http_error_and_empty_id() {
        let use_case = SubmitFeedbackUseCase::new(Arc::new(MockRetrieval::new().with_feedback(
            Err(BackendError::Http {
                status: 422,
                detail: Some("score must be an integer".into()),
            }),
        )));
        let error = use_case
            .execute(SubmitFeedbackInput::new("q-7", 1))
            .await
            .unwrap_err();
        assert_eq!(error.code, HTTP_ERROR);
        assert_eq!(error.details.as_deref(), Some("score must be an integer"));

        let error = use_case
            .execute(SubmitFeedbackInput::new(" ", 1))
            .await
            .unwrap_err();
        assert_eq!(error.code, INVALID_ARGUMENT);
    }
}
