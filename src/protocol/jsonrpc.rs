//! JSON-RPC 2.0 message types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";

/// Error codes returned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    UnknownTool,
    ToolExecution,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::UnknownTool => -32602,
            ErrorCode::ToolExecution => -32603,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::UnknownTool => "Unknown tool",
            ErrorCode::ToolExecution => "Tool execution error",
        }
    }
}

/// Incoming request or notification
#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_valid(&self) -> bool {
        self.jsonrpc == JSONRPC_VERSION
    }

    /// Notifications carry no id and get no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Request id, `null` for notifications
    pub fn response_id(&self) -> Value {
        self.id.clone().unwrap_or(Value::Null)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

impl JsonRpcError {
    pub fn new(id: Value, code: ErrorCode, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: ErrorObject {
                code: code.code(),
                message: code.message().to_string(),
                data,
            },
        }
    }

    /// Error with a `{"details": ...}` payload
    pub fn with_details(id: Value, code: ErrorCode, details: impl Into<String>) -> Self {
        Self::new(id, code, Some(json!({ "details": details.into() })))
    }
}

/// Outgoing message: success or error
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Success(JsonRpcResponse),
    Error(JsonRpcError),
}

impl JsonRpcMessage {
    pub fn success(id: Value, result: Value) -> Self {
        JsonRpcMessage::Success(JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        })
    }

    pub fn error(id: Value, code: ErrorCode, data: Option<Value>) -> Self {
        JsonRpcMessage::Error(JsonRpcError::new(id, code, data))
    }

    /// Error code, if this is an error message
    pub fn error_code(&self) -> Option<i32> {
        match self {
            JsonRpcMessage::Success(_) => None,
            JsonRpcMessage::Error(e) => Some(e.error.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_id_is_notification() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .unwrap();
        assert!(req.is_valid());
        assert!(req.is_notification());
        assert_eq!(req.response_id(), Value::Null);
    }

    #[test]
    fn test_error_serialization() {
        let msg = JsonRpcMessage::Error(JsonRpcError::with_details(
            json!(7),
            ErrorCode::MethodNotFound,
            "nope",
        ));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["error"]["code"], -32601);
        assert_eq!(json["error"]["message"], "Method not found");
        assert_eq!(json["error"]["data"]["details"], "nope");
        assert_eq!(msg.error_code(), Some(-32601));
    }

    #[test]
    fn test_success_has_no_error_field() {
        let json = serde_json::to_value(JsonRpcMessage::success(json!(1), json!({}))).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert!(json.get("error").is_none());
    }
}
