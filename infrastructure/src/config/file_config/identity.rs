//! Caller identity from TOML (`[identity]` section)

use serde::{Deserialize, Serialize};

/// Raw identity configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Sent as `user_id` with NL2SQL requests for cache attribution
    pub user_id: String,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            user_id: "unknown".to_string(),
        }
    }
}
