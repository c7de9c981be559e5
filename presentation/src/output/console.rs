//! Console output for the `tools` and `call` subcommands

use colored::Colorize;
use kbsearch_domain::tool::{ToolDefinition, ToolResult, ToolSpec};

/// Formats tool listings and tool results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every tool in the tool spec, sorted by name, with aliases last.
    pub fn tool_list(spec: &ToolSpec) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Available Tools"));
        output.push('\n');

        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));

        for tool in tools {
            output.push_str(&Self::tool_entry(tool));
        }

        let mut aliases: Vec<(&str, &str)> = spec.aliases().collect();
        if !aliases.is_empty() {
            aliases.sort_unstable();
            output.push_str(&format!("\n{}\n", "Aliases:".cyan().bold()));
            for (alias, canonical) in aliases {
                output.push_str(&format!("  {} -> {}\n", alias, canonical));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn tool_entry(tool: &ToolDefinition) -> String {
        let summary = tool.description.lines().next().unwrap_or_default();
        let mut entry = format!("\n{}\n  {}\n", tool.name.yellow().bold(), summary);

        for param in &tool.parameters {
            let marker = if param.required {
                "required".red().to_string()
            } else {
                "optional".dimmed().to_string()
            };
            let default = param
                .default
                .as_ref()
                .map(|d| format!(", default {}", d))
                .unwrap_or_default();
            entry.push_str(&format!(
                "    {} ({}, {}{})  {}\n",
                param.name.bold(),
                param.param_type,
                marker,
                default,
                param.description
            ));
        }
        entry
    }

    /// Format a tool result as the agent would see it, with a status line.
    pub fn tool_result(result: &ToolResult) -> String {
        let status = if result.is_success() {
            format!("{} {}", "v".green(), result.tool_name.bold())
        } else {
            let code = result.error().map(|e| e.code.as_str()).unwrap_or_default();
            format!("{} {} [{}]", "x".red(), result.tool_name.bold(), code.red())
        };
        let elapsed = result
            .metadata
            .duration_ms
            .map(|ms| format!(" {}", format!("({} ms)", ms).dimmed()))
            .unwrap_or_default();

        format!("{}{}\n\n{}\n", status, elapsed, result.display_text())
    }

    /// Format a tool result as pretty JSON
    pub fn tool_result_json(result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbsearch_domain::tool::{ToolError, ToolParameter};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_tool_list() {
        plain();
        let spec = ToolSpec::new()
            .register(
                ToolDefinition::new("search_knowledge_base", "Search the knowledge base.\n\nMore text.")
                    .with_parameter(ToolParameter::new("query", "Search query", true))
                    .with_parameter(
                        ToolParameter::new("top_k", "Passages", false)
                            .with_type("integer")
                            .with_default(5),
                    ),
            )
            .register(ToolDefinition::new("query_cicd_cache_stats", "Cache statistics"))
            .register_alias("search", "search_knowledge_base");

        let output = ConsoleFormatter::tool_list(&spec);

        let stats = output.find("query_cicd_cache_stats").unwrap();
        let search = output.find("search_knowledge_base").unwrap();
        assert!(stats < search);
        assert!(output.contains("  Search the knowledge base.\n"));
        assert!(!output.contains("More text."));
        assert!(output.contains("query (string, required)  Search query"));
        assert!(output.contains("top_k (integer, optional, default 5)  Passages"));
        assert!(output.contains("search -> search_knowledge_base"));
    }

    #[test]
    fn test_tool_result_failure_shows_code() {
        plain();
        let result = ToolResult::failure(
            "query_cicd_execute",
            ToolError::backend("SQL execution failed").with_details("syntax error"),
        )
        .with_duration(42);

        let output = ConsoleFormatter::tool_result(&result);
        assert!(output.starts_with("x query_cicd_execute [BACKEND_ERROR] (42 ms)\n\n"));
        assert!(output.contains("Error: SQL execution failed\n\nDetails: syntax error"));
    }

    #[test]
    fn test_tool_result_json() {
        let result = ToolResult::success("submit_feedback", "Feedback recorded.");
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::tool_result_json(&result)).unwrap();
        assert_eq!(value["tool_name"], "submit_feedback");
        assert_eq!(value["success"], true);
    }
}
