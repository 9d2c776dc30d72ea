//! The HTTP router: health, auth and JSON-RPC over POST /mcp.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use parcel_desk_server::middleware::REQUEST_ID_HEADER;
use parcel_desk_server::routes::app;
use parcel_desk_server::{AppState, ServerConfig};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

const TOKEN: &str = "integration-token-3b91e0c47d2a5f68";

fn router(auth_token: Option<&str>) -> axum::Router {
    let config = ServerConfig {
        auth_token: auth_token.map(|t| SecretString::from(t.to_string())),
        ..ServerConfig::default()
    };
    app(AppState::from_config(config).unwrap())
}

fn rpc(body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/mcp").header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tool_call_over_http() {
    let response = router(None)
        .oneshot(rpc(
            &json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": "get_order_status", "arguments": { "order_id": "ORD-1001-D" } }
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    let body = json_body(response).await;
    assert_eq!(body["result"]["structuredContent"]["status"], "delivered");
}

#[tokio::test]
async fn test_bearer_token_guards_mcp_only() {
    let ping = json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" });

    let denied = router(Some(TOKEN)).oneshot(rpc(&ping, None)).await.unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    assert!(denied.headers().contains_key(header::WWW_AUTHENTICATE));

    let allowed = router(Some(TOKEN))
        .oneshot(rpc(&ping, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);

    let health = router(Some(TOKEN))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_index_reports_auth_requirement() {
    let response = router(Some(TOKEN))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let info = json_body(response).await;
    assert_eq!(info["auth_required"], true);
    assert_eq!(info["tools"], 15);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let request = Request::post("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{oops"))
        .unwrap();
    let response = router(None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["error"]["code"], -32700);
}
