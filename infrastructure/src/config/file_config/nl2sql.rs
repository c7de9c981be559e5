//! NL2SQL backend configuration from TOML (`[nl2sql]` section)
//!
//! Generation of SQL happens downstream of the prepare endpoint, so the
//! default timeout is much longer than the retrieval one.

use serde::{Deserialize, Serialize};

/// Raw NL2SQL configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNl2SqlConfig {
    /// Prepare endpoint (POST)
    pub prepare_url: String,
    /// Execute endpoint (POST)
    pub execute_url: String,
    /// Base URL of the `/cache/*` endpoints; derived from `prepare_url` when unset
    pub cache_base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Entries requested when the caller omits `limit` on cache listing
    pub cache_list_limit: i64,
}

impl Default for FileNl2SqlConfig {
    fn default() -> Self {
        Self {
            prepare_url: "http://localhost:8088/prepare".to_string(),
            execute_url: "http://localhost:8088/execute".to_string(),
            cache_base_url: None,
            timeout_secs: 30,
            cache_list_limit: 50,
        }
    }
}

impl FileNl2SqlConfig {
    /// Base URL for cache introspection.
    ///
    /// `http://host:8088/prepare` → `http://host:8088`
    pub fn resolved_cache_base_url(&self) -> String {
        if let Some(base) = self.cache_base_url.as_deref()
            && !base.trim().is_empty()
        {
            return base.trim_end_matches('/').to_string();
        }
        match self.prepare_url.rsplit_once('/') {
            Some((base, _)) => base.to_string(),
            None => self.prepare_url.clone(),
        }
    }
}
