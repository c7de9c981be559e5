//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `call`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The text the agent would see
    #[default]
    Text,
    /// The full tool result as JSON
    Json,
}

/// CLI arguments for kbsearch-mcp
#[derive(Parser, Debug)]
#[command(name = "kbsearch-mcp")]
#[command(author, version, about = "MCP tool server for knowledge base search and CI/CD queries")]
#[command(long_about = r#"
kbsearch-mcp exposes two groups of tools to MCP clients over stdio:

- Knowledge base: search_knowledge_base, submit_feedback
- CI/CD database: query_cicd_prepare, query_cicd_execute,
  query_cicd_cache_stats, query_cicd_cache_list

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/kbsearch-mcp/config.toml   Global config
3. ./kbsearch.toml                      Project-level config
4. --config <path>                      Explicit config file
5. RAG_SERVICE_URL, NL2SQL_PREPARE_URL, USER_ID, ... and KBSEARCH_<SECTION>__<KEY>

Example:
  kbsearch-mcp                          # serve on stdio
  kbsearch-mcp tools
  kbsearch-mcp call search_knowledge_base --args '{"query": "how do I roll back?"}'
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the tools over stdio (default)
    Serve,

    /// List the available tools
    Tools,

    /// Invoke a single tool and print its result
    Call {
        /// Tool name (aliases accepted)
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, short, value_name = "JSON", default_value = "{}")]
        args: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

impl Cli {
    /// The subcommand to run, `serve` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["kbsearch-mcp"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_call_with_args() {
        let cli = Cli::try_parse_from([
            "kbsearch-mcp",
            "-vv",
            "call",
            "query_cicd_prepare",
            "--args",
            r#"{"question": "last deploy?"}"#,
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command(),
            Command::Call {
                tool: "query_cicd_prepare".to_string(),
                args: r#"{"question": "last deploy?"}"#.to_string(),
                output: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kbsearch-mcp", "tools", "--config", "custom.toml", "--show-config"])
                .unwrap();
        assert_eq!(cli.command(), Command::Tools);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(cli.show_config);
    }

    #[test]
    fn test_call_args_default_to_empty_object() {
        let cli = Cli::try_parse_from(["kbsearch-mcp", "call", "query_cicd_cache_stats"]).unwrap();
        match cli.command() {
            Command::Call { args, output, .. } => {
                assert_eq!(args, "{}");
                assert_eq!(output, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
