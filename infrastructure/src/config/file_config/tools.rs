//! Tools configuration from TOML (`[tools]` section)
//!
//! Each tool group can be switched off. A disabled group's tools are not
//! listed and calls to them are rejected as unknown.
//!
//! ```toml
//! [tools]
//! retrieval = true
//! cicd = true
//! cache_introspection = false
//! ```

use serde::{Deserialize, Serialize};

/// Raw tools configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// `search_knowledge_base` and `submit_feedback`
    pub retrieval: bool,
    /// `query_cicd_prepare` and `query_cicd_execute`
    pub cicd: bool,
    /// `query_cicd_cache_stats` and `query_cicd_cache_list`
    pub cache_introspection: bool,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            retrieval: true,
            cicd: true,
            cache_introspection: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_group() {
        let toml_str = r#"
[tools]
cache_introspection = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.tools.retrieval);
        assert!(config.tools.cicd);
        assert!(!config.tools.cache_introspection);
    }
}
