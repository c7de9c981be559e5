//! Query-cache introspection
//!
//! The cache itself belongs to the NL2SQL backend; these types only read
//! what its `/cache/stats` and `/cache/list` endpoints report.

use serde::{Deserialize, Serialize};

use super::protocol::lenient;
use super::response::QueryFailure;
use super::rows::{NOT_AVAILABLE, short_date};
use super::summary::round1;
use super::ui::{UiComponent, render_cache_list, render_cache_stats};

// Fields decode leniently: a `null` or mistyped value becomes `None` and
// renders as N/A.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopQuery {
    #[serde(default, deserialize_with = "lenient::text")]
    pub cache_key: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub use_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_used: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_entries: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_hits: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_uses_per_query: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub unique_users: Option<u64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub top_queries: Vec<TopQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub cache_key: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_used: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub use_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheList {
    #[serde(default, deserialize_with = "lenient::list")]
    pub cached_queries: Vec<CacheEntry>,
}

/// A reported number, or N/A when the backend did not report a usable one.
pub fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_cache_stats(stats: &CacheStats) -> String {
    let mut output = format!(
        "**Query cache: {} cached queries, {} total hits, {} avg uses/query, {} unique users**",
        or_na(stats.total_entries),
        or_na(stats.total_hits),
        or_na(stats.avg_uses_per_query.map(round1)),
        or_na(stats.unique_users)
    );

    if !stats.top_queries.is_empty() {
        output.push_str("\n\nMost popular queries:");
        for (i, q) in stats.top_queries.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {} (used {} times, last used {})",
                i + 1,
                q.cache_key,
                or_na(q.use_count),
                short_date(q.last_used.as_deref())
            ));
        }
    }

    output
}

pub fn format_cache_list(list: &CacheList) -> String {
    if list.cached_queries.is_empty() {
        return "No queries have been cached yet.".to_string();
    }

    let entries: Vec<String> = list
        .cached_queries
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "{}. {}\n   Created: {} | Last used: {} | Uses: {} | Created by: {}",
                i + 1,
                q.cache_key,
                short_date(q.created_at.as_deref()),
                short_date(q.last_used.as_deref()),
                or_na(q.use_count),
                q.created_by.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        })
        .collect();

    format!(
        "**Cached queries (showing {})**\n\n{}",
        list.cached_queries.len(),
        entries.join("\n\n")
    )
}

fn decode<T: serde::de::DeserializeOwned>(data: &serde_json::Value) -> Option<T> {
    if !data.is_object() {
        return None;
    }
    serde_json::from_value(data.clone()).ok()
}

/// Text for a body that is not a JSON object at all.
fn unreadable(data: &serde_json::Value) -> String {
    format!(
        "Cache service returned an unrecognized body:\n{}",
        serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
    )
}

/// Backend body passed through with its rendered forms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheSnapshot {
    pub data: serde_json::Value,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiComponent>,
}

/// Payload of the cache introspection tools
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum CacheReport {
    #[serde(rename = "success")]
    Success(CacheSnapshot),
    #[serde(rename = "error")]
    Error(QueryFailure),
}

impl CacheReport {
    pub fn stats(data: serde_json::Value, rich_ui: bool) -> Self {
        let (formatted, ui) = match decode::<CacheStats>(&data) {
            Some(stats) => (
                format_cache_stats(&stats),
                rich_ui.then(|| render_cache_stats(&stats)),
            ),
            None => (unreadable(&data), None),
        };
        CacheReport::Success(CacheSnapshot {
            data,
            formatted,
            ui,
        })
    }

    pub fn list(data: serde_json::Value, rich_ui: bool) -> Self {
        let (formatted, ui) = match decode::<CacheList>(&data) {
            Some(list) => (
                format_cache_list(&list),
                rich_ui.then(|| render_cache_list(&list)),
            ),
            None => (unreadable(&data), None),
        };
        CacheReport::Success(CacheSnapshot {
            data,
            formatted,
            ui,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CacheReport::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_cache_stats() {
        let stats: CacheStats = serde_json::from_value(json!({
            "total_entries": 12,
            "total_hits": 40,
            "avg_uses_per_query": 3.333,
            "unique_users": 4,
            "top_queries": [
                {"cache_key": "deploy:frontend:prod", "use_count": 10, "last_used": "2024-03-01T10:15:42"}
            ]
        }))
        .unwrap();

        assert_eq!(
            format_cache_stats(&stats),
            "**Query cache: 12 cached queries, 40 total hits, 3.3 avg uses/query, 4 unique users**\n\n\
             Most popular queries:\n1. deploy:frontend:prod (used 10 times, last used 2024-03-01T10:15)"
        );
    }

    #[test]
    fn test_format_cache_list() {
        let list: CacheList = serde_json::from_value(json!({
            "cached_queries": [
                {"cache_key": "k1", "created_at": "2024-03-01T10:15:42", "use_count": 2, "created_by": "alice"}
            ]
        }))
        .unwrap();

        assert_eq!(
            format_cache_list(&list),
            "**Cached queries (showing 1)**\n\n1. k1\n   Created: 2024-03-01T10:15 | Last used: N/A | Uses: 2 | Created by: alice"
        );
        assert_eq!(
            format_cache_list(&CacheList::default()),
            "No queries have been cached yet."
        );
    }

    #[test]
    fn test_null_and_mistyped_fields_render_as_not_available() {
        let report = CacheReport::stats(
            json!({
                "total_entries": 5,
                "total_hits": "17",
                "avg_uses_per_query": null,
                "unique_users": 3,
                "top_queries": [{"cache_key": "k1", "use_count": null}, 42]
            }),
            false,
        );
        let CacheReport::Success(snapshot) = report else {
            panic!("expected success");
        };

        assert_eq!(snapshot.data["total_entries"], 5);
        assert_eq!(
            snapshot.formatted,
            "**Query cache: 5 cached queries, 17 total hits, N/A avg uses/query, 3 unique users**\n\n\
             Most popular queries:\n1. k1 (used N/A times, last used N/A)"
        );
    }

    #[test]
    fn test_list_entry_with_null_use_count() {
        let list: CacheList = serde_json::from_value(json!({
            "cached_queries": [{"cache_key": "k1", "use_count": null, "created_by": null}]
        }))
        .unwrap();
        assert_eq!(list.cached_queries[0].use_count, None);
        assert!(format_cache_list(&list).contains("Uses: N/A | Created by: N/A"));
    }

    #[test]
    fn test_non_object_body_is_shown_as_is() {
        let CacheReport::Success(snapshot) = CacheReport::list(json!(["k1", "k2"]), true) else {
            panic!("expected success");
        };
        assert!(snapshot.formatted.starts_with("Cache service returned an unrecognized body:"));
        assert!(snapshot.formatted.contains("\"k2\""));
        assert!(snapshot.ui.is_none());
    }

    #[test]
    fn test_report_keeps_backend_body() {
        let data = json!({"total_entries": 1, "extra": "kept"});
        let report = serde_json::to_value(CacheReport::stats(data, true)).unwrap();

        assert_eq!(report["status"], "success");
        assert_eq!(report["data"]["extra"], "kept");
        assert_eq!(report["ui"]["type"], "container");

        let report = serde_json::to_value(CacheReport::list(json!({}), false)).unwrap();
        assert_eq!(report["formatted"], "No queries have been cached yet.");
        assert!(report.get("ui").is_none());
    }
}
