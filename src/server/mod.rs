//! MCP Server implementation
//!
//! Reads one JSON-RPC message per line and writes one response per line.

mod handlers;

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::error::SearchResult;
use crate::protocol::{
    ErrorCode, JsonRpcError, JsonRpcMessage, JsonRpcRequest, McpTool, ServerInfo, Tool,
    PROTOCOL_VERSION,
};

pub use handlers::{extract_arguments, extract_tool_name};

/// MCP Server that handles JSON-RPC communication over line-delimited streams
pub struct McpServer {
    server_info: ServerInfo,
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl McpServer {
    pub fn new() -> Self {
        Self::with_info(ServerInfo::default())
    }

    pub fn with_info(info: ServerInfo) -> Self {
        Self {
            server_info: info,
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool with the server
    pub fn register_tool(&mut self, tool: Box<dyn Tool>) -> &mut Self {
        let name = tool.name();
        tracing::debug!("Registered tool {}", name);
        self.tools.insert(name, tool);
        self
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Serve stdin/stdout until stdin closes (blocking)
    pub fn run(&self) -> SearchResult<()> {
        tracing::info!(
            "{} {} serving {} tools on stdio",
            self.server_info.name,
            self.server_info.version,
            self.tools.len()
        );
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve any line-delimited reader/writer pair
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> SearchResult<()> {
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                if let Some(response) = self.handle_request(trimmed) {
                    writeln!(writer, "{}", serde_json::to_string(&response)?)?;
                    writer.flush()?;
                }
            }
            line.clear();
        }
        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message; notifications produce no response
    pub fn handle_request(&self, request_str: &str) -> Option<JsonRpcMessage> {
        let request: JsonRpcRequest = match serde_json::from_str(request_str) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Unparseable request: {}", e);
                return Some(JsonRpcMessage::Error(JsonRpcError::with_details(
                    Value::Null,
                    ErrorCode::ParseError,
                    e.to_string(),
                )));
            }
        };

        let id = request.response_id();
        if !request.is_valid() {
            return Some(JsonRpcMessage::Error(JsonRpcError::with_details(
                id,
                ErrorCode::InvalidRequest,
                "jsonrpc must be '2.0'",
            )));
        }

        tracing::debug!(method = %request.method, "Request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "notifications/initialized" => return None,
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params.as_ref()),
            "ping" => JsonRpcMessage::success(id, json!({})),
            _ => JsonRpcMessage::error(
                id,
                ErrorCode::MethodNotFound,
                Some(json!({ "method": request.method })),
            ),
        };

        if request.is_notification() {
            None
        } else {
            Some(response)
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcMessage {
        JsonRpcMessage::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": self.server_info.name,
                    "version": self.server_info.version
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcMessage {
        let tools: Vec<McpTool> = self.tools.values().map(|t| t.definition()).collect();
        JsonRpcMessage::success(id, json!({ "tools": tools }))
    }

    fn handle_tool_call(&self, id: Value, params: Option<&Value>) -> JsonRpcMessage {
        let Some(tool_name) = params.and_then(extract_tool_name) else {
            return JsonRpcMessage::Error(JsonRpcError::with_details(
                id,
                ErrorCode::InvalidRequest,
                "Missing tool name",
            ));
        };

        let Some(tool) = self.tools.get(tool_name) else {
            return JsonRpcMessage::error(
                id,
                ErrorCode::UnknownTool,
                Some(json!({ "tool": tool_name })),
            );
        };

        let arguments = params.map(extract_arguments).unwrap_or_else(|| json!({}));
        match tool.execute(arguments) {
            Ok(result) => JsonRpcMessage::success(id, result),
            Err(e) => {
                tracing::warn!(tool = %tool_name, "Tool execution failed: {}", e);
                JsonRpcMessage::Error(JsonRpcError::with_details(
                    id,
                    ErrorCode::ToolExecution,
                    e.to_string(),
                ))
            }
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::protocol::text_content;

    struct EchoTool;

    impl Tool for EchoTool {
        fn definition(&self) -> McpTool {
            McpTool::new("echo", "Echo the text argument", json!({"type": "object"}))
        }

        fn execute(&self, params: Value) -> SearchResult<Value> {
            let text = params
                .get("text")
                .and_then(|v| v.as_str())
                .ok_or_else(|| SearchError::invalid_query("Missing text"))?;
            Ok(text_content(text))
        }
    }

    fn server() -> McpServer {
        let mut server = McpServer::new();
        server.register_tool(Box::new(EchoTool));
        server
    }

    fn call(server: &McpServer, request: Value) -> Value {
        let response = server.handle_request(&request.to_string()).unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_initialize() {
        let response = call(
            &server(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}),
        );
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "product-search");
    }

    #[test]
    fn test_error_codes() {
        let server = server();
        let parse = server.handle_request("{not json").unwrap();
        assert_eq!(parse.error_code(), Some(-32700));

        let bad_version = call(&server, json!({"jsonrpc": "1.0", "id": 1, "method": "ping"}));
        assert_eq!(bad_version["error"]["code"], -32600);

        let unknown_method = call(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "x"}));
        assert_eq!(unknown_method["error"]["code"], -32601);

        let unknown_tool = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "nope"}}),
        );
        assert_eq!(unknown_tool["error"]["code"], -32602);

        let failing = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "echo"}}),
        );
        assert_eq!(failing["error"]["code"], -32603);
    }

    #[test]
    fn test_tool_call_and_notification() {
        let server = server();
        let response = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"text": "hi"}}}),
        );
        assert_eq!(response["result"]["content"][0]["text"], "hi");

        let note = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.handle_request(&note.to_string()).is_none());
    }

    #[test]
    fn test_serve_writes_one_line_per_response() {
        let server = server();
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let tools: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(tools["result"]["tools"][0]["name"], "echo");
    }
}
