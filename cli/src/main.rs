//! CLI entrypoint for kbsearch-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use kbsearch_application::ToolExecutorPort;
use kbsearch_domain::ToolCall;
use kbsearch_infrastructure::config::FileLoggingConfig;
use kbsearch_infrastructure::{
    CicdToolProvider, ConfigLoader, FileConfig, HttpNl2SqlBackend, HttpRetrievalBackend,
    JsonSchemaToolConverter, RetrievalToolProvider, ToolRegistry,
};
use kbsearch_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, StdioServer,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        if !cli.no_config {
            ConfigLoader::print_config_sources(cli.config.as_deref());
            println!();
        }
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    // Stdout belongs to the protocol in serve mode, so logs go to stderr
    let _guard = init_logging(cli.verbose, &config.logging);

    let issues = config.validate();
    if !issues.is_empty() {
        let messages: Vec<String> = issues.iter().map(|e| format!("  - {}", e)).collect();
        bail!("Invalid configuration:\n{}", messages.join("\n"));
    }

    info!(
        search_url = %config.retrieval.search_url,
        prepare_url = %config.nl2sql.prepare_url,
        user_id = %config.identity.user_id,
        "Starting kbsearch-mcp"
    );

    // === Dependency Injection ===
    let registry = Arc::new(build_registry(&config).await?);

    match cli.command() {
        Command::Serve => {
            let server = StdioServer::new(registry, Arc::new(JsonSchemaToolConverter));
            server.run_stdio().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Tools => {
            print!("{}", ConsoleFormatter::tool_list(registry.tool_spec()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Call { tool, args, output } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&args).context("--args must be valid JSON")?;
            if !arguments.is_object() {
                bail!("--args must be a JSON object, got: {}", arguments);
            }

            let progress = ProgressReporter::new(cli.quiet);
            progress.on_call_start(&tool);
            let result = registry.execute(&ToolCall::from_json(tool, arguments)).await;
            progress.on_call_complete(result.is_success());

            let rendered = match output {
                OutputFormat::Text => ConsoleFormatter::tool_result(&result),
                OutputFormat::Json => ConsoleFormatter::tool_result_json(&result),
            };
            println!("{}", rendered);

            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

async fn build_registry(config: &FileConfig) -> Result<ToolRegistry> {
    let options = config.adapter_options();

    let retrieval = Arc::new(
        HttpRetrievalBackend::new(&config.retrieval).context("Failed to build retrieval client")?,
    );
    let nl2sql = Arc::new(
        HttpNl2SqlBackend::new(&config.nl2sql).context("Failed to build NL2SQL client")?,
    );

    let mut registry = ToolRegistry::new()
        .register(RetrievalToolProvider::new(retrieval, &options).with_enabled(config.tools.retrieval))
        .register(
            CicdToolProvider::new(nl2sql, config.caller_identity(), &options)
                .with_query_tools(config.tools.cicd)
                .with_cache_tools(config.tools.cache_introspection),
        );
    registry.discover().await;

    let stats = registry.stats();
    if stats.total_tools == 0 {
        warn!("All tool groups are disabled; no tools will be served");
    }
    info!(
        providers = stats.total_providers,
        tools = stats.total_tools,
        "Tool registry ready"
    );

    Ok(registry)
}

/// Initialize logging based on verbosity level, plus an optional log file.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
