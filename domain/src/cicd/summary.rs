//! Aggregate statistics over a classified result set

use serde::{Serialize, Serializer};

use super::rows::ResultSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentSummary {
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    #[serde(serialize_with = "as_percent")]
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSummary {
    pub runs: usize,
    pub total_tests: i64,
    pub passed: i64,
    pub failed: i64,
    pub skipped: i64,
    #[serde(serialize_with = "as_percent")]
    pub pass_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericSummary {
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultSummary {
    Deployments(DeploymentSummary),
    Tests(TestSummary),
    Generic(GenericSummary),
}

impl ResultSummary {
    pub fn of(results: &ResultSet) -> Self {
        match results {
            ResultSet::Deployments(rows) => {
                let total = rows.len();
                let successes = rows.iter().filter(|r| r.is_success()).count();
                let failures = rows.iter().filter(|r| r.is_failure()).count();
                ResultSummary::Deployments(DeploymentSummary {
                    total,
                    successes,
                    failures,
                    success_rate: rate(successes as f64, total as f64),
                })
            }
            ResultSet::Tests(rows) => {
                let passed: i64 = rows.iter().map(|r| r.tests_passed).sum();
                let failed: i64 = rows.iter().map(|r| r.tests_failed).sum();
                let skipped: i64 = rows.iter().map(|r| r.tests_skipped).sum();
                let total_tests = passed + failed;
                ResultSummary::Tests(TestSummary {
                    runs: rows.len(),
                    total_tests,
                    passed,
                    failed,
                    skipped,
                    pass_rate: rate(passed as f64, total_tests as f64),
                })
            }
            ResultSet::Generic(rows) => ResultSummary::Generic(GenericSummary { total: rows.len() }),
        }
    }
}

/// `100 * part / whole` rounded to one decimal; 0 when `whole` is 0.
pub fn rate(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round1(100.0 * part / whole)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `"50.0%"`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn as_percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&percent(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cicd::rows::row;
    use serde_json::json;

    fn summarize(rows: serde_json::Value) -> ResultSummary {
        let rows: Vec<_> = rows.as_array().unwrap().iter().cloned().map(row).collect();
        ResultSummary::of(&ResultSet::classify(&rows))
    }

    #[test]
    fn test_deployment_summary_serialization() {
        let summary = summarize(json!([
            {"app_name": "frontend", "deploy_result": "SUCCESS"},
            {"app_name": "frontend", "deploy_result": "FAILURE"}
        ]));
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"total": 2, "successes": 1, "failures": 1, "success_rate": "50.0%"})
        );
    }

    #[test]
    fn test_unrecognized_result_counts_toward_total_only() {
        let summary = summarize(json!([
            {"deploy_result": "SUCCESS"},
            {"deploy_result": "SUCCESS"},
            {"deploy_result": "CANCELLED"}
        ]));
        let ResultSummary::Deployments(s) = summary else {
            panic!("expected deployment summary");
        };
        assert_eq!((s.total, s.successes, s.failures), (3, 2, 0));
        assert!(s.successes + s.failures <= s.total);
        assert_eq!(s.success_rate, 66.7);
    }

    #[test]
    fn test_test_summary_pass_rate() {
        let summary = summarize(json!([
            {"test_type": "unit", "tests_passed": 90, "tests_failed": 2, "tests_skipped": 1},
            {"test_type": "e2e", "tests_passed": 30, "tests_failed": 2}
        ]));
        let ResultSummary::Tests(s) = summary else {
            panic!("expected test summary");
        };
        assert_eq!(s.runs, 2);
        assert_eq!(s.total_tests, 124);
        assert_eq!((s.passed, s.failed, s.skipped), (120, 4, 1));
        assert_eq!(s.pass_rate, 96.8);
    }

    #[test]
    fn test_pass_rate_zero_guard() {
        let summary = summarize(json!([{"test_type": "lint", "tests_skipped": 4}]));
        let ResultSummary::Tests(s) = summary else {
            panic!("expected test summary");
        };
        assert_eq!(s.total_tests, 0);
        assert_eq!(s.pass_rate, 0.0);
        assert_eq!(serde_json::to_value(&s).unwrap()["pass_rate"], "0.0%");
    }

    #[test]
    fn test_generic_summary() {
        let summary = summarize(json!([{"count": 1}, {"count": 2}]));
        assert_eq!(serde_json::to_value(&summary).unwrap(), json!({"total": 2}));
    }

    #[test]
    fn test_rate_helpers() {
        assert_eq!(rate(1.0, 3.0), 33.3);
        assert_eq!(rate(5.0, 0.0), 0.0);
        assert_eq!(percent(100.0), "100.0%");
    }
}
