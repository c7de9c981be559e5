//! Text rendering of result sets for display by the calling agent
//!
//! Output is deterministic for a given input: rows keep backend order and
//! generic rows list their columns in key order.

use super::protocol::Row;
use super::rows::{DeploymentRow, NOT_AVAILABLE, ResultSet, TestRow, display_value, short_date};
use super::summary::{DeploymentSummary, GenericSummary, ResultSummary, TestSummary, percent};

pub const NO_RESULTS: &str = "No results found matching your query.";

pub fn format_results(results: &ResultSet, summary: &ResultSummary) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let (header, entries) = match (results, summary) {
        (ResultSet::Deployments(rows), ResultSummary::Deployments(s)) => (
            deployment_header(s),
            rows.iter().map(deployment_entry).collect::<Vec<_>>(),
        ),
        (ResultSet::Tests(rows), ResultSummary::Tests(s)) => {
            (test_header(s), rows.iter().map(test_entry).collect())
        }
        (ResultSet::Generic(rows), ResultSummary::Generic(s)) => {
            (generic_header(s), rows.iter().map(generic_entry).collect())
        }
        // Mismatched pair: recompute from the rows
        (results, _) => return format_results(results, &ResultSummary::of(results)),
    };

    let numbered: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry))
        .collect();

    format!("{}\n\n{}", header, numbered.join("\n\n"))
}

fn deployment_header(s: &DeploymentSummary) -> String {
    format!(
        "**Found {} {}: {} successful, {} failed ({} success rate)**",
        s.total,
        plural(s.total, "deployment", "deployments"),
        s.successes,
        s.failures,
        percent(s.success_rate)
    )
}

fn test_header(s: &TestSummary) -> String {
    format!(
        "**Found {} test {}: {} passed, {} failed, {} skipped ({} pass rate)**",
        s.runs,
        plural(s.runs, "run", "runs"),
        s.passed,
        s.failed,
        s.skipped,
        percent(s.pass_rate)
    )
}

fn generic_header(s: &GenericSummary) -> String {
    format!("**Found {} {}**", s.total, plural(s.total, "result", "results"))
}

fn deployment_entry(row: &DeploymentRow) -> String {
    let glyph = if row.is_success() {
        "✅"
    } else if row.is_failure() {
        "❌"
    } else {
        "⚠️"
    };
    format!(
        "{} {} {} → {}\n   Result: {} | Date: {} | Deployed by: {}",
        glyph,
        or_na(&row.app_name),
        or_na(&row.app_version),
        or_na(&row.deploy_env),
        row.deploy_result.as_deref().unwrap_or("UNKNOWN"),
        short_date(row.date.as_deref()),
        or_na(&row.deployed_by)
    )
}

fn test_entry(row: &TestRow) -> String {
    let glyph = if row.has_failures() { "❌" } else { "✅" };
    format!(
        "{} {} {} ({})\n   Passed: {} | Failed: {} | Skipped: {} | Duration: {} | Date: {}",
        glyph,
        or_na(&row.app_name),
        or_na(&row.app_version),
        or_na(&row.test_type),
        row.tests_passed,
        row.tests_failed,
        row.tests_skipped,
        row.duration_label(),
        short_date(row.date.as_deref())
    )
}

fn generic_entry(row: &Row) -> String {
    row.iter()
        .map(|(key, value)| format!("{}: {}", key, display_value(value)))
        .collect::<Vec<_>>()
        .join("\n   ")
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
