//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["kbsearch.toml", ".kbsearch.toml"];

/// Prefix for environment overrides (`KBSEARCH_RETRIEVAL__TIMEOUT_SECS=10`).
const ENV_PREFIX: &str = "KBSEARCH_";

/// Backend environment variables honoured for existing deployments,
/// paired with the config key each one sets.
pub const LEGACY_ENV: [(&str, &str); 7] = [
    ("RAG_SERVICE_URL", "retrieval.search_url"),
    ("RAG_FEEDBACK_URL", "retrieval.feedback_url"),
    ("RAG_TIMEOUT", "retrieval.timeout_secs"),
    ("NL2SQL_PREPARE_URL", "nl2sql.prepare_url"),
    ("NL2SQL_EXECUTE_URL", "nl2sql.execute_url"),
    ("NL2SQL_TIMEOUT", "nl2sql.timeout_secs"),
    ("USER_ID", "identity.user_id"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `KBSEARCH_*` variables, then the legacy backend variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./kbsearch.toml` or `./.kbsearch.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/kbsearch-mcp/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config).
    ///
    /// Environment variables still apply so that a bare `--no-config`
    /// launch from an MCP client can point at its backends.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment)
    }

    fn with_env(figment: Figment) -> Figment {
        let legacy_keys: Vec<&str> = LEGACY_ENV.iter().map(|(env, _)| *env).collect();
        let legacy = Env::raw().only(&legacy_keys).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(env, _)| key.as_str().eq_ignore_ascii_case(env))
                .map(|(_, path)| (*path).into())
                .unwrap_or_else(|| key.as_str().to_string().into())
        });

        figment
            .merge(legacy)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/kbsearch-mcp/config.toml if set,
    /// otherwise falls back to ~/.config/kbsearch-mcp/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kbsearch-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        let overrides: Vec<&str> = LEGACY_ENV
            .iter()
            .map(|(env, _)| *env)
            .filter(|env| std::env::var_os(env).is_some())
            .collect();
        if overrides.is_empty() {
            println!("  [     ] Env:     {}* and legacy backend variables", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", overrides.join(", "));
        }

        if let Some(path) = explicit {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", marker, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./kbsearch.toml or ./.kbsearch.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
