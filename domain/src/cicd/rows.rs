//! Result-row classification
//!
//! The backend returns rows from several tables through the same endpoint.
//! A result list is classified once, by its first row, into a [`ResultSet`]:
//!
//! | First row contains | Shape |
//! |--------------------|-------|
//! | `deploy_result` | [`ResultSet::Deployments`] |
//! | `test_type` or `tests_passed` | [`ResultSet::Tests`] |
//! | anything else, or no rows | [`ResultSet::Generic`] |

use serde::Serialize;
use serde_json::Value;

use super::protocol::Row;
use crate::util::truncate_str;

/// Placeholder for absent fields in rendered output
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Deployment,
    Test,
    Generic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRow {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub deploy_env: Option<String>,
    pub deploy_result: Option<String>,
    pub date: Option<String>,
    pub deployed_by: Option<String>,
}

impl DeploymentRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            app_name: text_field(row, "app_name"),
            app_version: text_field(row, "app_version"),
            deploy_env: text_field(row, "deploy_env"),
            deploy_result: text_field(row, "deploy_result"),
            date: text_field(row, "date"),
            deployed_by: text_field(row, "deployed_by"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.deploy_result.as_deref() == Some("SUCCESS")
    }

    pub fn is_failure(&self) -> bool {
        self.deploy_result.as_deref() == Some("FAILURE")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestRow {
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub test_type: Option<String>,
    pub tests_passed: i64,
    pub tests_failed: i64,
    pub tests_skipped: i64,
    pub test_duration_seconds: Option<f64>,
    pub date: Option<String>,
}

impl TestRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            app_name: text_field(row, "app_name"),
            app_version: text_field(row, "app_version"),
            test_type: text_field(row, "test_type"),
            tests_passed: int_field(row, "tests_passed"),
            tests_failed: int_field(row, "tests_failed"),
            tests_skipped: int_field(row, "tests_skipped"),
            test_duration_seconds: float_field(row, "test_duration_seconds"),
            date: text_field(row, "date"),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.tests_failed > 0
    }

    /// `"12.5s"`, or `N/A` when the duration is missing or zero
    pub fn duration_label(&self) -> String {
        match self.test_duration_seconds {
            Some(secs) if secs != 0.0 => format!("{}s", secs),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A homogeneous result list, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    Deployments(Vec<DeploymentRow>),
    Tests(Vec<TestRow>),
    Generic(Vec<Row>),
}

impl ResultSet {
    pub fn classify(rows: &[Row]) -> Self {
        match rows.first().map(classify_row) {
            Some(ResultKind::Deployment) => {
                ResultSet::Deployments(rows.iter().map(DeploymentRow::from_row).collect())
            }
            Some(ResultKind::Test) => ResultSet::Tests(rows.iter().map(TestRow::from_row).collect()),
            _ => ResultSet::Generic(rows.to_vec()),
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            ResultSet::Deployments(_) => ResultKind::Deployment,
            ResultSet::Tests(_) => ResultKind::Test,
            ResultSet::Generic(_) => ResultKind::Generic,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResultSet::Deployments(rows) => rows.len(),
            ResultSet::Tests(rows) => rows.len(),
            ResultSet::Generic(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn classify_row(row: &Row) -> ResultKind {
    if row.contains_key("deploy_result") {
        ResultKind::Deployment
    } else if row.contains_key("test_type") || row.contains_key("tests_passed") {
        ResultKind::Test
    } else {
        ResultKind::Generic
    }
}

/// Render a cell value: strings unquoted, null as `N/A`, others as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Timestamps are shown to minute precision (`YYYY-MM-DD HH:MM`).
pub fn short_date(date: Option<&str>) -> String {
    match date {
        Some(d) if !d.is_empty() => truncate_str(d, 16).to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn text_field(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::Null => None,
        value => Some(display_value(value)),
    }
}

fn int_field(row: &Row, key: &str) -> i64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn float_field(row: &Row, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}
