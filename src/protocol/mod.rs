//! Protocol types for MCP and JSON-RPC communication

mod jsonrpc;
mod mcp;

pub use jsonrpc::{
    ErrorCode, ErrorObject, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse,
    JSONRPC_VERSION,
};
pub use mcp::{json_content, text_content, McpTool, ServerInfo, Tool, PROTOCOL_VERSION};
