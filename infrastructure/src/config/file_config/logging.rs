//! Logging configuration from TOML (`[logging]` section)
//!
//! Logs always go to stderr. Setting `directory` additionally writes a
//! daily-rotated file there.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for log files (file logging disabled when unset)
    pub directory: Option<PathBuf>,
    /// File name prefix; the date is appended on rotation
    pub file_prefix: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "kbsearch-mcp.log".to_string(),
        }
    }
}
