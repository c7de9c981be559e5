//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };

            // Explicit nulls mean "use the default"
            if value.is_null() {
                continue;
            }

            let matches = match param.param_type.as_str() {
                "integer" => value.is_i64(),
                "number" => value.is_number(),
                "boolean" => value.is_boolean(),
                _ => value.is_string(),
            };
            if !matches {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be of type {}",
                    arg_name, definition.name, param.param_type
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn execute_definition() -> ToolDefinition {
        ToolDefinition::new("query_cicd_execute", "Execute SQL")
            .with_parameter(ToolParameter::new("sql", "SQL text", true))
            .with_parameter(ToolParameter::new("cache_key", "Cache key", true))
            .with_parameter(
                ToolParameter::new("confirm_cache", "Cache the pattern", false)
                    .with_type("boolean")
                    .with_default(true),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("query_cicd_execute").with_arg("sql", "SELECT 1");
        let result = DefaultToolValidator.validate(&call, &execute_definition());
        assert!(result.unwrap_err().contains("Missing required parameter 'cache_key'"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("query_cicd_execute")
            .with_arg("sql", "SELECT 1")
            .with_arg("cache_key", "k1")
            .with_arg("dialect", "postgres");
        let result = DefaultToolValidator.validate(&call, &execute_definition());
        assert!(result.unwrap_err().contains("Unknown parameter"));
    }

    #[test]
    fn test_validator_type_mismatch() {
        let call = ToolCall::new("query_cicd_execute")
            .with_arg("sql", "SELECT 1")
            .with_arg("cache_key", "k1")
            .with_arg("confirm_cache", "yes");
        let result = DefaultToolValidator.validate(&call, &execute_definition());
        assert!(result.unwrap_err().contains("must be of type boolean"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("query_cicd_execute")
            .with_arg("sql", "SELECT 1")
            .with_arg("cache_key", "k1")
            .with_arg("confirm_cache", serde_json::Value::Null);
        assert!(DefaultToolValidator.validate(&call, &execute_definition()).is_ok());
    }

    #[test]
    fn test_validator_integer_out_of_i64_range() {
        let definition = ToolDefinition::new("search_knowledge_base", "Search").with_parameter(
            ToolParameter::new("top_k", "Passages", false).with_type("integer"),
        );

        let call = ToolCall::new("search_knowledge_base").with_arg("top_k", u64::MAX);
        let result = DefaultToolValidator.validate(&call, &definition);
        assert!(result.unwrap_err().contains("must be of type integer"));

        let call = ToolCall::new("search_knowledge_base").with_arg("top_k", i64::MAX);
        assert!(DefaultToolValidator.validate(&call, &definition).is_ok());
        assert_eq!(call.get_i64("top_k"), Some(i64::MAX));
    }
}
