//! Knowledge base tools: search_knowledge_base, submit_feedback

use async_trait::async_trait;
use kbsearch_application::{
    AdapterOptions, RetrievalService, SearchKnowledgeBaseInput, SearchKnowledgeBaseUseCase,
    SubmitFeedbackInput, SubmitFeedbackUseCase,
};
use kbsearch_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::{ToolError, ToolResult},
};
use std::sync::Arc;
use std::time::Instant;

/// Tool name constants
pub const SEARCH_KNOWLEDGE_BASE: &str = "search_knowledge_base";
pub const SUBMIT_FEEDBACK: &str = "submit_feedback";

static ALIASES: [(&str, &str); 1] = [("search", SEARCH_KNOWLEDGE_BASE)];

/// Get the tool definition for search_knowledge_base
pub fn search_knowledge_base_definition(default_top_k: i64) -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_KNOWLEDGE_BASE,
        "Search the internal knowledge base for authoritative information.

When to use:
- Before answering any technical, procedural or \"how-to\" question.
- Whenever factual accuracy matters.

Constraints:
- Do NOT answer from general knowledge without calling this tool first.
- Cite sources using the [n] markers shown next to each passage.
- If the tool reports that nothing relevant was found, say so explicitly before answering from general knowledge.

Output: passages labeled with citation markers, a sources list with relevance scores, and a Query ID that can be passed to submit_feedback.",
    )
    .with_parameter(ToolParameter::new("query", "Natural language search query", true))
    .with_parameter(ToolParameter::new(
        "profile",
        "Retrieval profile to search with (backend default when omitted)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("top_k", "Number of passages to retrieve", false)
            .with_type("integer")
            .with_default(default_top_k),
    )
}

/// Get the tool definition for submit_feedback
pub fn submit_feedback_definition() -> ToolDefinition {
    ToolDefinition::new(
        SUBMIT_FEEDBACK,
        "Record whether a knowledge base search was helpful.

Use the Query ID printed at the end of a search_knowledge_base result. Positive scores mark the passages as useful, negative scores as unhelpful.",
    )
    .with_parameter(ToolParameter::new(
        "query_id",
        "Query ID returned by search_knowledge_base",
        true,
    ))
    .with_parameter(
        ToolParameter::new("score", "Relevance score for the search", true).with_type("integer"),
    )
    .with_parameter(ToolParameter::new("comment", "Optional free-text comment", false))
}

/// Provider for the knowledge base tool group
#[derive(Clone)]
pub struct RetrievalToolProvider {
    search: SearchKnowledgeBaseUseCase,
    feedback: SubmitFeedbackUseCase,
    default_top_k: i64,
    enabled: bool,
}

impl RetrievalToolProvider {
    pub fn new(service: Arc<dyn RetrievalService>, options: &AdapterOptions) -> Self {
        Self {
            search: SearchKnowledgeBaseUseCase::new(service.clone())
                .with_default_top_k(options.default_top_k),
            feedback: SubmitFeedbackUseCase::new(service),
            default_top_k: options.default_top_k,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    async fn run_search(&self, call: &ToolCall) -> Result<String, ToolError> {
        let query = call.require_string("query").map_err(ToolError::invalid_argument)?;
        let input = SearchKnowledgeBaseInput::new(query)
            .with_profile(call.get_string("profile").map(str::to_string))
            .with_top_k(call.get_i64("top_k"));
        self.search.execute(input).await
    }

    async fn run_feedback(&self, call: &ToolCall) -> Result<String, ToolError> {
        let query_id = call
            .require_string("query_id")
            .map_err(ToolError::invalid_argument)?;
        let score = call.require_i64("score").map_err(ToolError::invalid_argument)?;
        let input = SubmitFeedbackInput::new(query_id, score)
            .with_comment(call.get_string("comment").map(str::to_string));
        self.feedback.execute(input).await
    }
}

#[async_trait]
impl ToolProvider for RetrievalToolProvider {
    fn id(&self) -> &str {
        "retrieval"
    }

    fn display_name(&self) -> &str {
        "Knowledge Base"
    }

    async fn is_available(&self) -> bool {
        self.enabled
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        Ok(vec![
            search_knowledge_base_definition(self.default_top_k),
            submit_feedback_definition(),
        ])
    }

    fn aliases(&self) -> &[(&'static str, &'static str)] {
        &ALIASES
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let outcome = match call.tool_name.as_str() {
            SEARCH_KNOWLEDGE_BASE => self.run_search(call).await,
            SUBMIT_FEEDBACK => self.run_feedback(call).await,
            other => Err(ToolError::not_found(format!("Tool not found: {}", other))),
        };

        let result = match outcome {
            Ok(text) => ToolResult::success(&call.tool_name, text),
            Err(e) => ToolResult::failure(&call.tool_name, e),
        };
        result.with_duration(start.elapsed().as_millis() as u64)
    }
}
