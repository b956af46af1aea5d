//! MCP server implementation.
//!
//! Handles tool discovery and execution over a stdin/stdout line transport.
//! One request is processed at a time; the server holds no mutable state
//! across calls, so pipelined hosts could dispatch concurrently without
//! coordination.

use std::io::{BufRead, Write};

use noco_client::NocoClient;
use serde_json::{Value, json};

use crate::catalog;
use crate::error::McpError;
use crate::executor::{ExecutionResult, ToolExecutor};
use crate::protocol::*;
use crate::resource;
use crate::tools::ToolRegistry;

/// The MCP server.
pub struct McpServer {
    tools: ToolRegistry,
    executor: ToolExecutor,
}

impl McpServer {
    /// Create a server wired to the given NocoDB client, with the full
    /// tool catalog registered.
    pub fn new(client: NocoClient) -> Self {
        let mut tools = ToolRegistry::new();
        for tool in catalog::builtin_tools() {
            tools.register(tool);
        }
        Self {
            tools,
            executor: ToolExecutor::new(client),
        }
    }

    /// Serve requests on stdin/stdout until the input closes.
    pub async fn run(&self) -> Result<(), McpError> {
        tracing::info!(tool_count = self.tools.len(), "starting MCP server on stdio");

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut stdout_lock = stdout.lock();

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(e) => {
                    let response =
                        JsonRpcResponse::error(None, -32700, format!("Parse error: {e}"));
                    writeln!(stdout_lock, "{}", serde_json::to_string(&response)?)?;
                    stdout_lock.flush()?;
                    continue;
                }
            };

            // Notifications carry no id and get no reply.
            let is_notification = request.id.is_none();
            let response = self.handle_request(request).await;
            if is_notification {
                continue;
            }

            writeln!(stdout_lock, "{}", serde_json::to_string(&response)?)?;
            stdout_lock.flush()?;
        }

        Ok(())
    }

    /// Handle a JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" | "notifications/initialized" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "resources/templates/list" => JsonRpcResponse::success(id, resource::templates()),
            "resources/read" => self.handle_read_resource(id, request.params),
            "shutdown" => self.handle_shutdown(id),
            _ => JsonRpcResponse::error(
                id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = json!({
            "protocolVersion": "2024-11-05",
            "serverInfo": {
                "name": "noco-mcp",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {},
                "resources": {}
            }
        });
        JsonRpcResponse::success(id, result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<_> = self
            .tools
            .list()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, format!("Invalid params: {}", e));
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        let tool = match self.tools.get(&params.name) {
            Some(t) => t.clone(),
            None => {
                return JsonRpcResponse::error(
                    id,
                    -32602,
                    format!("Tool not found: {}", params.name),
                );
            }
        };

        let result = self.executor.execute(&tool, params.arguments).await;
        execution_result_to_response(id, result)
    }

    fn handle_read_resource(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let uri = params
            .as_ref()
            .and_then(|p| p.get("uri"))
            .and_then(Value::as_str);

        match uri {
            Some(uri) => match resource::read(uri) {
                Some(contents) => JsonRpcResponse::success(id, contents),
                None => {
                    JsonRpcResponse::error(id, -32002, format!("Resource not found: {uri}"))
                }
            },
            None => JsonRpcResponse::error(id, -32602, "Missing uri"),
        }
    }

    fn handle_shutdown(&self, id: Option<Value>) -> JsonRpcResponse {
        tracing::info!("MCP server shutdown requested");
        JsonRpcResponse::success(id, json!(null))
    }
}

/// Wrap an execution result into the tool-call response envelope. Failures
/// surface as `isError: true` so the agent sees a failure signal, not a
/// protocol fault.
fn execution_result_to_response(id: Option<Value>, result: ExecutionResult) -> JsonRpcResponse {
    let content: Vec<Value> = result
        .content
        .iter()
        .map(|c| match c {
            ToolContent::Text { text, mime_type } => match mime_type {
                Some(mime_type) => json!({"type": "text", "text": text, "mimeType": mime_type}),
                None => json!({"type": "text", "text": text}),
            },
        })
        .collect();

    JsonRpcResponse::success(
        id,
        json!({
            "content": content,
            "isError": !result.success
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use noco_client::ConnectionConfig;

    fn server() -> McpServer {
        let config = ConnectionConfig::new("http://localhost:8080", "base1", "token1");
        McpServer::new(NocoClient::new(config).unwrap())
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let response = server().handle_request(request("initialize", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "noco-mcp");
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn lists_the_full_catalog() {
        let response = server().handle_request(request("tools/list", None)).await;
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 11);

        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"nocodb-get-records"));
        assert!(names.contains(&"nocodb-delete-records-bulk"));
    }

    #[tokio::test]
    async fn unknown_tool_is_a_protocol_error() {
        let response = server()
            .handle_request(request(
                "tools/call",
                Some(json!({ "name": "nonexistent", "arguments": {} })),
            ))
            .await;
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn invalid_arguments_surface_as_tool_failure() {
        let response = server()
            .handle_request(request(
                "tools/call",
                Some(json!({ "name": "nocodb-get-records", "arguments": {} })),
            ))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let response = server().handle_request(request("bogus/method", None)).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn reads_greeting_resource() {
        let response = server()
            .handle_request(request(
                "resources/read",
                Some(json!({ "uri": "greeting://Ada" })),
            ))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["contents"][0]["text"], "Hello, Ada!");
    }

    #[tokio::test]
    async fn lists_resource_templates() {
        let response = server()
            .handle_request(request("resources/templates/list", None))
            .await;
        let result = response.result.unwrap();
        assert_eq!(
            result["resourceTemplates"][0]["uriTemplate"],
            "greeting://{name}"
        );
    }
}
