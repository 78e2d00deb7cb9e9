//! MCP (Model Context Protocol) types

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::SearchResult;

/// Protocol revision announced during the handshake
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP Tool definition
#[derive(Serialize, Debug, Clone)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl McpTool {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Server information for MCP handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "product-search".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Trait for MCP tools
///
/// All tools must implement this trait to be registered with the MCP server.
pub trait Tool: Send + Sync {
    /// Get the tool definition for tools/list
    fn definition(&self) -> McpTool;

    /// Execute the tool with the given arguments
    fn execute(&self, params: Value) -> SearchResult<Value>;

    fn name(&self) -> String {
        self.definition().name
    }
}

/// Tool result carrying one text block
pub fn text_content(text: impl Into<String>) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text.into()
        }]
    })
}

/// Tool result carrying a value rendered as pretty JSON text
pub fn json_content<T: Serialize>(value: &T) -> SearchResult<Value> {
    Ok(text_content(serde_json::to_string_pretty(value)?))
}
