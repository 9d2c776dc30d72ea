//! Model Context Protocol over JSON-RPC 2.0.
//!
//! [`McpHandler`] turns one JSON-RPC message into at most one response. It
//! knows nothing about transports: the stdio loop and the HTTP route both feed
//! it raw messages and write back whatever it returns.

pub mod stdio;

use std::sync::Arc;

use parcel_desk_core::ValidationLayer;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::content::SupportContent;
use crate::tools::{ToolError, ToolExecutor, all_tools};

/// Protocol revision offered when the client asks for one we do not know.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

/// Protocol revisions this server can speak.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "parcel-desk";

const INSTRUCTIONS: &str = "Customer support tools for an online store. Use get_order_status, \
    get_customer_orders, cancel_order, process_return and track_package for order questions, \
    and the get_* \
    information tools for policies, shipping, sizing, warranties, payments, accounts and the \
    loyalty program.";

/// JSON-RPC error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

// =============================================================================
// Wire types
// =============================================================================

/// Incoming JSON-RPC message. A message without an `id` is a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    pub jsonrpc: String,
    /// Request identifier. An explicit `null` is still a request.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    /// Method name.
    pub method: String,
    /// Optional parameters payload.
    #[serde(default)]
    pub params: Option<Value>,
}

/// Maps any value that is present, `null` included, to `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    /// Whether the sender expects no response.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    pub jsonrpc: String,
    /// Request identifier (`null` when the request could not be read).
    pub id: Value,
    /// Successful result payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
}

/// `tools/call` parameters.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

// =============================================================================
// Handler
// =============================================================================

/// Dispatches MCP requests to the tools.
#[derive(Debug, Clone)]
pub struct McpHandler {
    orders: ValidationLayer,
    content: Arc<SupportContent>,
}

impl McpHandler {
    /// Create a handler over an order layer and support content.
    #[must_use]
    pub const fn new(orders: ValidationLayer, content: Arc<SupportContent>) -> Self {
        Self { orders, content }
    }

    /// A tool executor borrowing this handler's collaborators.
    #[must_use]
    pub fn executor(&self) -> ToolExecutor<'_> {
        ToolExecutor::new(&self.orders, &self.content)
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns the serialized response, or `None` for notifications and for
    /// responses that could not be serialized.
    pub async fn handle_message(&self, raw: &str) -> Option<String> {
        match self.respond(raw).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to serialize JSON-RPC response");
                None
            }
        }
    }

    /// Handle one raw JSON-RPC message, surfacing serialization failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be serialized.
    pub async fn respond(&self, raw: &str) -> Result<Option<String>, serde_json::Error> {
        let response = match serde_json::from_str::<Value>(raw) {
            Ok(message) => match self.handle_value(message).await {
                Some(response) => response,
                None => return Ok(None),
            },
            Err(e) => {
                warn!(error = %e, "Unparseable JSON-RPC message");
                JsonRpcResponse::failure(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                )
            }
        };

        serde_json::to_string(&response).map(Some)
    }

    /// Handle a parsed JSON value that should be a JSON-RPC request.
    pub async fn handle_value(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Handle a request; notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                error_codes::INVALID_REQUEST,
                "Invalid request: jsonrpc must be \"2.0\"",
            ));
        }

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        debug!(method = %request.method, "Request received");
        let params = request.params.unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result(&params)),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": all_tools() })),
            "tools/call" => self.call_tool(id, params).await,
            other => JsonRpcResponse::failure(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    async fn call_tool(&self, id: Value, params: Value) -> JsonRpcResponse {
        let call = match serde_json::from_value::<ToolCallParams>(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::failure(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tool call params: {e}"),
                );
            }
        };

        let arguments = call.arguments.unwrap_or(Value::Null);
        match self.executor().execute(&call.name, &arguments).await {
            Ok(result) => {
                let is_error = result.is_error();
                let structured = result.into_value();
                let text = serde_json::to_string_pretty(&structured)
                    .unwrap_or_else(|_| structured.to_string());
                JsonRpcResponse::success(
                    id,
                    json!({
                        "content": [{ "type": "text", "text": text }],
                        "structuredContent": structured,
                        "isError": is_error,
                    }),
                )
            }
            Err(err @ ToolError::UnknownTool(_)) => {
                JsonRpcResponse::failure(id, error_codes::INVALID_PARAMS, err.to_string())
            }
            Err(err @ ToolError::Serialization(_)) => {
                warn!(tool = %call.name, error = %err, "Tool result could not be serialized");
                JsonRpcResponse::failure(id, error_codes::INTERNAL_ERROR, err.to_string())
            }
        }
    }
}

fn initialize_result(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(LATEST_PROTOCOL_VERSION);

    let client = params
        .get("clientInfo")
        .and_then(|info| info.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    info!(client, protocol_version = version, "MCP session initialized");

    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "instructions": INSTRUCTIONS,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};
    use parcel_desk_core::{MockPlatform, MockStateEngine};

    use super::*;

    fn handler() -> McpHandler {
        let engine =
            MockStateEngine::anchored_at(Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
        McpHandler::new(
            ValidationLayer::new(Arc::new(MockPlatform::with_engine(engine))),
            Arc::new(SupportContent::embedded().unwrap()),
        )
    }

    async fn roundtrip(raw: &str) -> Value {
        let body = handler().handle_message(raw).await.unwrap();
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_echoes_supported_version() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","clientInfo":{"name":"test"}}}"#,
        )
        .await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "parcel-desk");
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_initialize_unknown_version_gets_latest() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":"a","method":"initialize","params":{"protocolVersion":"1999-01-01"}}"#,
        )
        .await;
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"]["protocolVersion"], LATEST_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let handler = handler();
        let raw = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(handler.handle_message(raw).await.is_none());
        let raw = r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"cancel_order"}}"#;
        assert!(handler.handle_message(raw).await.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#).await;
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 15);
        assert!(tools.iter().all(|t| t.get("inputSchema").is_some()));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_order_status","arguments":{"order_id":"ORD-1002-S"}}}"#,
        )
        .await;
        let result = &response["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["status"], "shipped");
        assert_eq!(result["content"][0]["type"], "text");
        let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(text, result["structuredContent"]);
    }

    #[tokio::test]
    async fn test_tools_call_rejection_is_error_result() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"track_package","arguments":{"order_id":"ORD-1004-P"}}}"#,
        )
        .await;
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(response["result"]["structuredContent"]["error_code"], "not_tracked");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_invalid_params() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"nope"}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
        assert!(response["error"]["message"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_null_id_is_a_request() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));

        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(!request.is_notification());
        let notification: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping"}"#).unwrap();
        assert!(notification.is_notification());
    }

    #[tokio::test]
    async fn test_respond_distinguishes_notifications() {
        let handler = handler();
        let none = handler
            .respond(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .unwrap();
        assert!(none.is_none());

        let some = handler
            .respond(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#)
            .await
            .unwrap();
        assert!(some.is_some());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let parse = roundtrip("{not json").await;
        assert_eq!(parse["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(parse["id"], Value::Null);

        let version = roundtrip(r#"{"jsonrpc":"1.0","id":8,"method":"ping"}"#).await;
        assert_eq!(version["error"]["code"], error_codes::INVALID_REQUEST);
        assert_eq!(version["id"], 8);

        let shape = roundtrip(r#"{"jsonrpc":"2.0","id":9}"#).await;
        assert_eq!(shape["error"]["code"], error_codes::INVALID_REQUEST);
        assert_eq!(shape["id"], 9);

        let method = roundtrip(r#"{"jsonrpc":"2.0","id":10,"method":"resources/list"}"#).await;
        assert_eq!(method["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }
}
