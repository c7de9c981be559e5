//! Rendering of retrieval results for the calling agent

use super::entities::SearchResponse;

/// Returned verbatim when the backend finds no chunks.
pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found in the knowledge base. \
Answer from general knowledge only if appropriate, and state explicitly that the knowledge base \
had no information on this topic.";

/// Render chunks as citation-labeled blocks followed by a sources list.
///
/// ```text
/// [1] Deploy runbook
/// Run the pipeline...
///
/// Sources:
/// [1] Deploy runbook - https://wiki/deploy (score: 0.912)
///
/// Query ID: q-42 | Retrieval latency: 38ms
/// ```
pub fn format_search_results(response: &SearchResponse) -> String {
    if response.chunks.is_empty() {
        return NO_RELEVANT_INFORMATION.to_string();
    }

    let blocks: Vec<String> = response
        .chunks
        .iter()
        .map(|chunk| format!("{} {}\n{}", chunk.citation, chunk.title, chunk.content))
        .collect();

    let mut output = blocks.join("\n\n");
    output.push_str("\n\nSources:\n");
    for chunk in &response.chunks {
        output.push_str(&format!("{} {}", chunk.citation, chunk.title));
        if let Some(url) = chunk.url.as_deref().filter(|u| !u.is_empty()) {
            output.push_str(&format!(" - {}", url));
        }
        output.push_str(&format!(" (score: {:.3})\n", chunk.score));
    }

    let query_id = response.query_id.as_deref().unwrap_or("unknown");
    let latency = match response.metrics.latency_ms {
        Some(ms) => format!("{}ms", ms),
        None => "n/a".to_string(),
    };
    output.push_str(&format!(
        "\nQuery ID: {} | Retrieval latency: {}",
        query_id, latency
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::entities::{RetrievedChunk, SearchMetrics};

    fn chunk(citation: &str, title: &str, url: Option<&str>, score: f64) -> RetrievedChunk {
        RetrievedChunk {
            citation: citation.into(),
            title: title.into(),
            content: format!("{} body", title),
            url: url.map(String::from),
            score,
        }
    }

    #[test]
    fn test_zero_chunks_returns_fixed_message() {
        let response = SearchResponse {
            query_id: Some("q-1".into()),
            ..Default::default()
        };
        assert_eq!(format_search_results(&response), NO_RELEVANT_INFORMATION);
    }

    #[test]
    fn test_blocks_sources_and_trailer() {
        let response = SearchResponse {
            chunks: vec![
                chunk("[1]", "Deploy runbook", Some("https://wiki/deploy"), 0.91234),
                chunk("[2]", "Rollback guide", None, 0.5),
            ],
            metrics: SearchMetrics {
                latency_ms: Some(38.0),
            },
            query_id: Some("q-42".into()),
        };

        let text = format_search_results(&response);
        assert!(text.starts_with("[1] Deploy runbook\nDeploy runbook body\n\n[2] Rollback guide"));
        assert!(text.contains("Sources:\n[1] Deploy runbook - https://wiki/deploy (score: 0.912)\n"));
        assert!(text.contains("[2] Rollback guide (score: 0.500)\n"));
        assert!(text.ends_with("Query ID: q-42 | Retrieval latency: 38ms"));
    }

    #[test]
    fn test_chunk_order_preserved() {
        let response = SearchResponse {
            chunks: vec![chunk("[2]", "B", None, 0.1), chunk("[1]", "A", None, 0.9)],
            ..Default::default()
        };
        let text = format_search_results(&response);
        let b = text.find("[2] B").unwrap();
        let a = text.find("[1] A").unwrap();
        assert!(b < a);
        assert!(text.ends_with("Query ID: unknown | Retrieval latency: n/a"));
    }
}
