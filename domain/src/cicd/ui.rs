//! Rich-UI component tree
//!
//! When rich output is enabled, CI/CD payloads carry a `ui` field with a
//! declarative component tree that a UI-capable host can render. Hosts that
//! don't understand it fall back to the `formatted` text.

use serde::Serialize;

use super::cache::{CacheList, CacheStats, or_na};
use super::protocol::Row;
use super::rows::{ResultSet, display_value, short_date};
use super::summary::{DeploymentSummary, ResultSummary, TestSummary, percent, round1};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    pub variant: Variant,
}

impl StatItem {
    fn new(label: &str, value: impl ToString, variant: Variant) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            variant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UiComponent {
    Container {
        layout: String,
        components: Vec<UiComponent>,
    },
    Alert {
        variant: Variant,
        title: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Stats {
        items: Vec<StatItem>,
    },
    Table {
        title: String,
        headers: Vec<String>,
        rows: Vec<TableRow>,
        sortable: bool,
        filterable: bool,
    },
    Collapsible {
        title: String,
        collapsed: bool,
        content: Box<UiComponent>,
    },
    Code {
        language: String,
        code: String,
    },
}

impl UiComponent {
    pub fn vertical(components: Vec<UiComponent>) -> Self {
        UiComponent::Container {
            layout: "vertical".to_string(),
            components,
        }
    }

    pub fn alert(variant: Variant, title: impl Into<String>, message: impl Into<String>) -> Self {
        UiComponent::Alert {
            variant,
            title: title.into(),
            message: message.into(),
            details: None,
        }
    }

    fn table(title: impl Into<String>, headers: &[&str], rows: Vec<TableRow>) -> Self {
        UiComponent::Table {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            sortable: true,
            filterable: true,
        }
    }

    fn sql_block(sql: &str) -> Self {
        UiComponent::Collapsible {
            title: "Generated SQL Query".to_string(),
            collapsed: true,
            content: Box::new(UiComponent::Code {
                language: "sql".to_string(),
                code: sql.to_string(),
            }),
        }
    }

    /// Put a banner alert above this component.
    pub fn with_banner(self, title: &str, message: impl Into<String>) -> Self {
        UiComponent::vertical(vec![UiComponent::alert(Variant::Success, title, message), self])
    }
}

pub fn success_rate_variant(rate: f64) -> Variant {
    if rate >= 90.0 {
        Variant::Success
    } else if rate >= 70.0 {
        Variant::Warning
    } else {
        Variant::Error
    }
}

pub fn pass_rate_variant(rate: f64) -> Variant {
    if rate >= 95.0 {
        Variant::Success
    } else if rate >= 80.0 {
        Variant::Warning
    } else {
        Variant::Error
    }
}

/// Build the component tree for a classified result set.
pub fn render_results(results: &ResultSet, summary: &ResultSummary, sql: Option<&str>) -> UiComponent {
    match (results, summary) {
        (ResultSet::Deployments(rows), ResultSummary::Deployments(s)) if !rows.is_empty() => {
            let mut components = Vec::new();
            if s.failures > 0 {
                components.push(UiComponent::alert(
                    Variant::Warning,
                    "Deployment Failures Detected",
                    format!(
                        "Found {} failed deployment(s) in the results. Review the table below for details.",
                        s.failures
                    ),
                ));
            }
            if let Some(sql) = sql {
                components.push(UiComponent::sql_block(sql));
            }
            components.push(deployment_stats(s));

            let table_rows = rows
                .iter()
                .map(|r| TableRow {
                    cells: vec![
                        cell(&r.app_name),
                        cell(&r.app_version),
                        cell(&r.deploy_env),
                        r.deploy_result.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
                        short_date(r.date.as_deref()),
                        cell(&r.deployed_by),
                    ],
                    variant: Some(if r.is_success() {
                        Variant::Success
                    } else if r.is_failure() {
                        Variant::Error
                    } else {
                        Variant::Warning
                    }),
                })
                .collect();
            components.push(UiComponent::table(
                "Deployment Results",
                &["App", "Version", "Environment", "Result", "Date", "Deployed By"],
                table_rows,
            ));
            UiComponent::vertical(components)
        }
        (ResultSet::Tests(rows), ResultSummary::Tests(s)) if !rows.is_empty() => {
            let mut components = Vec::new();
            if s.failed > 0 {
                components.push(UiComponent::alert(
                    Variant::Error,
                    "Test Failures Detected",
                    format!(
                        "Found {} failed test(s) across {} test run(s).",
                        s.failed, s.runs
                    ),
                ));
            }
            if let Some(sql) = sql {
                components.push(UiComponent::sql_block(sql));
            }
            components.push(test_stats(s));

            let table_rows = rows
                .iter()
                .map(|r| TableRow {
                    cells: vec![
                        cell(&r.app_name),
                        cell(&r.app_version),
                        cell(&r.test_type),
                        r.tests_passed.to_string(),
                        r.tests_failed.to_string(),
                        r.tests_skipped.to_string(),
                        r.duration_label(),
                        short_date(r.date.as_deref()),
                    ],
                    variant: Some(if r.has_failures() {
                        Variant::Error
                    } else {
                        Variant::Success
                    }),
                })
                .collect();
            components.push(UiComponent::table(
                "Test Results",
                &["App", "Version", "Test Type", "Passed", "Failed", "Skipped", "Duration", "Date"],
                table_rows,
            ));
            UiComponent::vertical(components)
        }
        (ResultSet::Generic(rows), _) if !rows.is_empty() => generic_table(rows),
        _ => UiComponent::alert(Variant::Info, "No Results", "No results found."),
    }
}

fn deployment_stats(s: &DeploymentSummary) -> UiComponent {
    UiComponent::Stats {
        items: vec![
            StatItem::new("Total Deployments", s.total, Variant::Default),
            StatItem::new("Successful", s.successes, Variant::Success),
            StatItem::new("Failed", s.failures, Variant::Error),
            StatItem::new(
                "Success Rate",
                percent(s.success_rate),
                success_rate_variant(s.success_rate),
            ),
        ],
    }
}

fn test_stats(s: &TestSummary) -> UiComponent {
    UiComponent::Stats {
        items: vec![
            StatItem::new("Test Runs", s.runs, Variant::Default),
            StatItem::new("Total Tests", s.total_tests, Variant::Default),
            StatItem::new("Passed", s.passed, Variant::Success),
            StatItem::new("Failed", s.failed, Variant::Error),
            StatItem::new("Skipped", s.skipped, Variant::Warning),
            StatItem::new("Pass Rate", percent(s.pass_rate), pass_rate_variant(s.pass_rate)),
        ],
    }
}

/// Columns come from the first row; later rows fill missing columns with `N/A`.
fn generic_table(rows: &[Row]) -> UiComponent {
    let headers: Vec<&str> = rows
        .first()
        .map(|r| r.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let table_rows = rows
        .iter()
        .map(|r| TableRow {
            cells: headers
                .iter()
                .map(|h| r.get(*h).map(display_value).unwrap_or_else(|| "N/A".to_string()))
                .collect(),
            variant: None,
        })
        .collect();
    UiComponent::table("Results", &headers, table_rows)
}

pub fn render_cache_stats(stats: &CacheStats) -> UiComponent {
    let mut components = vec![UiComponent::Stats {
        items: vec![
            StatItem::new("Cached Queries", or_na(stats.total_entries), Variant::Default),
            StatItem::new("Total Cache Hits", or_na(stats.total_hits), Variant::Success),
            StatItem::new(
                "Avg Uses/Query",
                or_na(stats.avg_uses_per_query.map(round1)),
                Variant::Default,
            ),
            StatItem::new("Unique Users", or_na(stats.unique_users), Variant::Default),
        ],
    }];

    if !stats.top_queries.is_empty() {
        let rows = stats
            .top_queries
            .iter()
            .map(|q| TableRow {
                cells: vec![
                    q.cache_key.clone(),
                    or_na(q.use_count),
                    short_date(q.last_used.as_deref()),
                ],
                variant: None,
            })
            .collect();
        components.push(UiComponent::Table {
            title: "Most Popular Queries".to_string(),
            headers: vec!["Query Pattern".into(), "Uses".into(), "Last Used".into()],
            rows,
            sortable: true,
            filterable: false,
        });
    }

    UiComponent::vertical(components)
}

pub fn render_cache_list(list: &CacheList) -> UiComponent {
    if list.cached_queries.is_empty() {
        return UiComponent::alert(
            Variant::Info,
            "No Cache Entries",
            "No queries have been cached yet.",
        );
    }

    let rows = list
        .cached_queries
        .iter()
        .map(|q| TableRow {
            cells: vec![
                q.cache_key.clone(),
                short_date(q.created_at.as_deref()),
                short_date(q.last_used.as_deref()),
                or_na(q.use_count),
                cell(&q.created_by),
            ],
            variant: None,
        })
        .collect();
    UiComponent::table(
        format!("Cached Queries (showing {})", list.cached_queries.len()),
        &["Cache Key", "Created At", "Last Used", "Use Count", "Created By"],
        rows,
    )
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cicd::rows::row;
    use serde_json::json;

    fn classify(rows: serde_json::Value) -> (ResultSet, ResultSummary) {
        let rows: Vec<_> = rows.as_array().unwrap().iter().cloned().map(row).collect();
        let set = ResultSet::classify(&rows);
        let summary = ResultSummary::of(&set);
        (set, summary)
    }

    #[test]
    fn test_rate_thresholds() {
        assert_eq!(success_rate_variant(90.0), Variant::Success);
        assert_eq!(success_rate_variant(70.0), Variant::Warning);
        assert_eq!(success_rate_variant(69.9), Variant::Error);
        assert_eq!(pass_rate_variant(95.0), Variant::Success);
        assert_eq!(pass_rate_variant(80.0), Variant::Warning);
        assert_eq!(pass_rate_variant(79.9), Variant::Error);
    }

    #[test]
    fn test_deployment_tree() {
        let (set, summary) = classify(json!([
            {"app_name": "frontend", "deploy_result": "SUCCESS"},
            {"app_name": "frontend", "deploy_result": "FAILURE"}
        ]));
        let tree = serde_json::to_value(render_results(&set, &summary, Some("SELECT 1"))).unwrap();

        assert_eq!(tree["type"], "container");
        let components = tree["components"].as_array().unwrap();
        assert_eq!(components[0]["type"], "alert");
        assert_eq!(components[0]["variant"], "warning");
        assert_eq!(components[1]["type"], "collapsible");
        assert_eq!(components[1]["content"]["code"], "SELECT 1");
        assert_eq!(components[2]["items"][3]["value"], "50.0%");
        assert_eq!(components[2]["items"][3]["variant"], "error");
        assert_eq!(components[3]["rows"][1]["variant"], "error");
    }

    #[test]
    fn test_test_tree_without_failures() {
        let (set, summary) = classify(json!([{"test_type": "unit", "tests_passed": 10}]));
        let tree = serde_json::to_value(render_results(&set, &summary, None)).unwrap();
        let components = tree["components"].as_array().unwrap();

        assert_eq!(components[0]["type"], "stats");
        assert_eq!(components[0]["items"][5]["variant"], "success");
        assert_eq!(components[1]["headers"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_generic_and_empty() {
        let (set, summary) = classify(json!([{"b": 1, "a": "x"}]));
        let tree = serde_json::to_value(render_results(&set, &summary, None)).unwrap();
        assert_eq!(tree["type"], "table");
        assert_eq!(tree["headers"], json!(["a", "b"]));
        assert_eq!(tree["rows"][0]["cells"], json!(["x", "1"]));

        let (set, summary) = classify(json!([]));
        let tree = serde_json::to_value(render_results(&set, &summary, None)).unwrap();
        assert_eq!(tree["type"], "alert");
        assert_eq!(tree["variant"], "info");
    }

    #[test]
    fn test_banner() {
        let tree = UiComponent::alert(Variant::Info, "No Results", "none").with_banner("Cache Hit", "hit");
        let json = serde_json::to_value(tree).unwrap();
        assert_eq!(json["components"][0]["title"], "Cache Hit");
        assert_eq!(json["components"][1]["title"], "No Results");
    }
}
