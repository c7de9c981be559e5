//! Wire types of the NL2SQL backend (prepare / execute endpoints)

use serde::{Deserialize, Serialize};

/// A result row as returned by the backend: column name → value.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareRequest {
    pub query: String,
    pub user_id: String,
}

/// Body sent to the execute endpoint. `cache_key` is forwarded exactly as
/// the agent supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub sql: String,
    pub cache_key: String,
    pub confirm_cache: bool,
    pub user_id: String,
}

/// Body returned by the prepare endpoint.
///
/// Decoding is lenient field by field: a value of an unexpected type is
/// coerced (or dropped) instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrepareResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Row>>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub row_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sql: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub instruction: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cache_key: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub cached: Option<bool>,
    /// Number of times the cached pattern has been served
    #[serde(default, deserialize_with = "lenient::count")]
    pub use_count: Option<u64>,
}

/// Body returned by the execute endpoint. Decoded as leniently as
/// [`PrepareResponse`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Row>>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub row_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sql: Option<String>,
    /// Whether the backend stored this SQL under the cache key
    #[serde(default, deserialize_with = "lenient::flag")]
    pub cached: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cache_key: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub error_type: Option<String>,
}

/// Field decoders that accept any JSON value.
///
/// `null` always decodes to `None`.
pub(crate) mod lenient {
    use crate::cicd::rows::display_value;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?.filter(|v| !v.is_null()))
    }

    /// Strings as-is, anything else in its JSON rendering.
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(value(deserializer)?.map(|v| display_value(&v)))
    }

    /// An array of anything, or a single value, as a list of strings.
    pub fn string_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<String>>, D::Error> {
        Ok(value(deserializer)?.map(|v| match v {
            Value::Array(items) => items.iter().map(display_value).collect(),
            other => vec![display_value(&other)],
        }))
    }

    /// Non-negative integers, also from floats and numeric strings.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Ok(value(deserializer)?.and_then(|v| as_count(&v)))
    }

    pub fn as_count(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
            }
            _ => None,
        }
    }

    /// Numbers (floats included) and numeric strings as `f64`.
    pub fn as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Like [`count`] for fractional values.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(value(deserializer)?.and_then(|v| as_number(&v)))
    }

    /// Like [`string`], with an empty string for `null`.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(string(deserializer)?.unwrap_or_default())
    }

    /// An array whose undecodable items are skipped. Anything but an array
    /// is an empty list.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match value(deserializer)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Booleans, also from `"true"`/`"false"`.
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(value(deserializer)?.and_then(|v| match v {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }))
    }
}

/// Backend `status` field, parsed once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Success,
    NeedsGeneration,
    Error,
    /// Anything else, including a missing field. Holds the literal value.
    Unrecognized(String),
}

impl BackendStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("success") => BackendStatus::Success,
            Some("needs_generation") => BackendStatus::NeedsGeneration,
            Some("error") => BackendStatus::Error,
            Some(other) => BackendStatus::Unrecognized(other.to_string()),
            None => BackendStatus::Unrecognized("(missing)".to_string()),
        }
    }

    /// Message surfaced to the agent for an unrecognized status.
    pub fn unexpected_message(&self) -> Option<String> {
        match self {
            BackendStatus::Unrecognized(value) => Some(format!("Unexpected status: {}", value)),
            _ => None,
        }
    }
}
