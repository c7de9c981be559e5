//! Caller identity sent with every NL2SQL request.

use serde::{Deserialize, Serialize};

/// Identity used by the NL2SQL backend for cache attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self {
            user_id: "unknown".to_string(),
        }
    }
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
