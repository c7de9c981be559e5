//! Stdio server loop and method dispatch

use super::protocol::{
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, Request,
    Response,
};
use kbsearch_application::{ToolExecutorPort, ToolSchemaPort};
use kbsearch_domain::tool::{ToolCall, ToolResult};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("stdio I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serves a tool executor to one MCP client over a line-delimited stream.
pub struct StdioServer {
    executor: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    name: String,
    version: String,
}

impl StdioServer {
    pub fn new(executor: Arc<dyn ToolExecutorPort>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            executor,
            schema,
            name: "kbsearch-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<(), ServerError> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.run(reader, writer).await
    }

    /// Serve on an arbitrary reader/writer pair until the reader is exhausted.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.executor.tool_spec().len(), "MCP stdio server started");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(line).await {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("MCP stdio server stopped (input closed)");
        Ok(())
    }

    /// Handle one incoming line. Returns the response line, or `None` for
    /// notifications.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(
                    Response::error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e))
                        .to_line(),
                );
            }
        };

        let request: Request = match serde_json::from_value(value.clone()) {
            Ok(r) => r,
            Err(e) => {
                let id = value.get("id").cloned()?;
                return Some(
                    Response::error(id, INVALID_REQUEST, format!("Invalid request: {}", e))
                        .to_line(),
                );
            }
        };

        debug!(method = %request.method, id = ?request.id, "Request received");
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "Notification ignored");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => Response::success(id, self.initialize_result()),
            "ping" => Response::success(id, json!({})),
            "tools/list" => Response::success(
                id,
                json!({ "tools": self.schema.all_tools_schema(self.executor.tool_spec()) }),
            ),
            "tools/call" => self.call_tool(id, &request.params).await,
            other => Response::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        };
        Some(response.to_line())
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": self.name, "version": self.version }
        })
    }

    async fn call_tool(&self, id: Value, params: &Value) -> Response {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return Response::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let call = ToolCall::from_json(name, arguments);
        let result = self.executor.execute(&call).await;
        info!(
            tool = name,
            success = result.success,
            elapsed_ms = ?result.metadata.duration_ms,
            "Tool call finished"
        );
        Response::success(id, call_result(&result))
    }
}

/// Shape a tool result as an MCP `tools/call` result.
fn call_result(result: &ToolResult) -> Value {
    let mut value = json!({
        "content": [{ "type": "text", "text": result.display_text() }],
        "isError": !result.is_success(),
    });
    if let Some(structured) = &result.structured {
        value["structuredContent"] = structured.clone();
    }
    value
}
