//! Configuration file loading for kbsearch-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `KBSEARCH_*` and legacy backend environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./kbsearch.toml` or `./.kbsearch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/kbsearch-mcp/config.toml`
//! 5. Fallback: `~/.config/kbsearch-mcp/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileIdentityConfig, FileLoggingConfig, FileNl2SqlConfig,
    FileOutputConfig, FileRetrievalConfig, FileToolsConfig,
};
pub use loader::{ConfigLoader, LEGACY_ENV};
