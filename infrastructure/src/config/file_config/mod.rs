//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! the binary.

mod identity;
mod logging;
mod nl2sql;
mod output;
mod retrieval;
mod tools;

pub use identity::FileIdentityConfig;
pub use logging::FileLoggingConfig;
pub use nl2sql::FileNl2SqlConfig;
pub use output::FileOutputConfig;
pub use retrieval::FileRetrievalConfig;
pub use tools::FileToolsConfig;

use kbsearch_application::{AdapterOptions, CallerIdentity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroTimeout { field: &'static str },

    #[error("{field} cannot be empty")]
    EmptyUrl { field: &'static str },

    #[error("{field}: '{value}' is not an http:// or https:// URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("identity.user_id cannot be empty")]
    EmptyUserId,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Retrieval backend
    pub retrieval: FileRetrievalConfig,
    /// NL2SQL backend
    pub nl2sql: FileNl2SqlConfig,
    /// Caller identity
    pub identity: FileIdentityConfig,
    /// Tool group toggles
    pub tools: FileToolsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        for (field, url) in [
            ("retrieval.search_url", &self.retrieval.search_url),
            ("retrieval.feedback_url", &self.retrieval.feedback_url),
            ("nl2sql.prepare_url", &self.nl2sql.prepare_url),
            ("nl2sql.execute_url", &self.nl2sql.execute_url),
        ] {
            if let Err(e) = check_url(field, url) {
                issues.push(e);
            }
        }
        // A blank cache_base_url means "derive from prepare_url"
        if let Some(base) = &self.nl2sql.cache_base_url
            && !base.trim().is_empty()
            && let Err(e) = check_url("nl2sql.cache_base_url", base)
        {
            issues.push(e);
        }

        if self.retrieval.timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroTimeout {
                field: "retrieval.timeout_secs",
            });
        }
        if self.nl2sql.timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroTimeout {
                field: "nl2sql.timeout_secs",
            });
        }

        if self.identity.user_id.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyUserId);
        }

        issues
    }

    pub fn caller_identity(&self) -> CallerIdentity {
        CallerIdentity::new(self.identity.user_id.clone())
    }

    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions::default()
            .with_default_top_k(self.retrieval.default_top_k)
            .with_cache_list_limit(self.nl2sql.cache_list_limit)
            .with_rich_ui(self.output.rich_ui)
    }
}

fn check_url(field: &'static str, url: &str) -> Result<(), ConfigValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigValidationError::EmptyUrl { field });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigValidationError::InvalidUrl {
            field,
            value: url.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[retrieval]
search_url = "https://rag.example.com/search"
feedback_url = "https://rag.example.com/feedback"
timeout_secs = 8
default_top_k = 10

[nl2sql]
prepare_url = "http://nl2sql:8088/prepare"
execute_url = "http://nl2sql:8088/execute"
timeout_secs = 60

[identity]
user_id = "ci-bot"

[output]
rich_ui = true

[logging]
directory = "/var/log/kbsearch"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.timeout_secs, 8);
        assert_eq!(config.nl2sql.timeout_secs, 60);
        assert_eq!(config.identity.user_id, "ci-bot");
        assert_eq!(
            config.logging.directory.as_deref(),
            Some(std::path::Path::new("/var/log/kbsearch"))
        );
        assert!(config.validate().is_empty());

        let options = config.adapter_options();
        assert_eq!(options.default_top_k, 10);
        assert!(options.rich_ui);
        assert_eq!(config.caller_identity().user_id, "ci-bot");
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.retrieval.search_url, "http://localhost:8000/search");
        assert_eq!(config.retrieval.timeout_secs, 5);
        assert_eq!(config.nl2sql.prepare_url, "http://localhost:8088/prepare");
        assert_eq!(config.nl2sql.execute_url, "http://localhost:8088/execute");
        assert_eq!(config.nl2sql.timeout_secs, 30);
        assert_eq!(config.identity.user_id, "unknown");
        assert!(config.tools.retrieval && config.tools.cicd && config.tools.cache_introspection);
        assert!(!config.output.rich_ui);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_blank_cache_base_url_is_unset() {
        let mut config = FileConfig::default();
        config.nl2sql.cache_base_url = Some("  ".to_string());
        assert!(config.validate().is_empty());
        assert_eq!(config.nl2sql.resolved_cache_base_url(), "http://localhost:8088");

        config.nl2sql.cache_base_url = Some("nl2sql:8088".to_string());
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::InvalidUrl {
                field: "nl2sql.cache_base_url",
                value: "nl2sql:8088".to_string()
            }]
        );
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let mut config = FileConfig::default();
        config.retrieval.search_url = String::new();
        config.nl2sql.execute_url = "localhost:8088/execute".to_string();
        config.nl2sql.timeout_secs = 0;
        config.identity.user_id = "  ".to_string();

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::EmptyUrl {
                    field: "retrieval.search_url"
                },
                ConfigValidationError::InvalidUrl {
                    field: "nl2sql.execute_url",
                    value: "localhost:8088/execute".to_string()
                },
                ConfigValidationError::ZeroTimeout {
                    field: "nl2sql.timeout_secs"
                },
                ConfigValidationError::EmptyUserId,
            ]
        );
        assert_eq!(issues[2].to_string(), "nl2sql.timeout_secs cannot be 0");
    }
}
