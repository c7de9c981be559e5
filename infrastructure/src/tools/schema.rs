//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{name, description, inputSchema}` objects listed by `tools/list`.

use kbsearch_application::ToolSchemaPort;
use kbsearch_domain::tool::entities::{ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Default implementation producing JSON Schema tool descriptors.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}
