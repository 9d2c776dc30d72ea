//! JSON-RPC sessions against the MCP handler.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use parcel_desk_integration_tests::anchored_handler;
use parcel_desk_server::McpHandler;
use serde_json::{Value, json};

async fn send(handler: &McpHandler, message: &Value) -> Option<Value> {
    handler
        .handle_message(&message.to_string())
        .await
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
async fn test_full_session() {
    let handler = anchored_handler();

    let init = send(
        &handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-06-18",
                "clientInfo": { "name": "integration", "version": "0.0.0" }
            }
        }),
    )
    .await
    .unwrap();
    assert_eq!(init["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(init["result"]["serverInfo"]["name"], "parcel-desk");

    let initialized = send(
        &handler,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    assert!(initialized.is_none());

    let list = send(&handler, &json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }))
        .await
        .unwrap();
    let tools = list["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 15);
    let cancel = tools.iter().find(|t| t["name"] == "cancel_order").unwrap();
    assert_eq!(cancel["annotations"]["destructiveHint"], true);
    assert!(cancel["inputSchema"]["required"]
        .as_array()
        .unwrap()
        .contains(&json!("order_id")));

    let call = send(
        &handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {
                "name": "track_package",
                "arguments": { "order_id": "ORD-1003-T" }
            }
        }),
    )
    .await
    .unwrap();
    assert_eq!(call["id"], 3);
    assert_eq!(call["result"]["isError"], false);
    assert_eq!(call["result"]["structuredContent"]["status"], "in_transit");
    assert_eq!(call["result"]["content"][0]["type"], "text");
}

#[tokio::test]
async fn test_tool_rejection_is_a_result_not_a_protocol_error() {
    let handler = anchored_handler();
    let response = send(
        &handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": "cancel_order", "arguments": { "order_id": "ORD-1006-C" } }
        }),
    )
    .await
    .unwrap();

    assert!(response.get("error").is_none_or(Value::is_null));
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(
        response["result"]["structuredContent"]["error_code"],
        "not_cancellable"
    );
}

#[tokio::test]
async fn test_support_tool_over_mcp() {
    let handler = anchored_handler();
    let response = send(
        &handler,
        &json!({
            "jsonrpc": "2.0",
            "id": "shipping",
            "method": "tools/call",
            "params": {
                "name": "get_shipping_info",
                "arguments": { "order_value": 100, "destination_country": "Canada" }
            }
        }),
    )
    .await
    .unwrap();

    assert_eq!(response["id"], "shipping");
    let info = &response["result"]["structuredContent"];
    assert!(info["customer_guidance"].as_str().unwrap().contains("qualifies"));
    assert!(info.to_string().contains("15.99"));
}

#[tokio::test]
async fn test_protocol_errors() {
    let handler = anchored_handler();

    let parse = handler.handle_message("{not json").await.unwrap();
    let parse: Value = serde_json::from_str(&parse).unwrap();
    assert_eq!(parse["error"]["code"], -32700);

    let unknown_method = send(
        &handler,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "resources/list" }),
    )
    .await
    .unwrap();
    assert_eq!(unknown_method["error"]["code"], -32601);

    let unknown_tool = send(
        &handler,
        &json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": { "name": "refund_everything", "arguments": {} }
        }),
    )
    .await
    .unwrap();
    assert_eq!(unknown_tool["error"]["code"], -32602);
}
