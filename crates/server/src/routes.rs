//! HTTP routes.
//!
//! GET  /        - Server info
//! GET  /health  - Liveness check
//! POST /mcp     - JSON-RPC endpoint (bearer token when configured)

use axum::{
    Extension, Json, Router,
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::{Instrument, Span};

use crate::error::AppError;
use crate::mcp::{LATEST_PROTOCOL_VERSION, SERVER_NAME};
use crate::middleware::{RequestId, request_id_middleware, require_bearer};
use crate::state::AppState;
use crate::tools::all_tools;

/// Build the application router with tracing, request ids and auth applied.
pub fn app(state: AppState) -> Router {
    let mcp = Router::new()
        .route("/mcp", post(mcp_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(mcp)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Server info.
async fn index(State(state): State<AppState>) -> Json<Value> {
    let config = state.config();
    Json(json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": LATEST_PROTOCOL_VERSION,
        "platform": config.platform.to_string(),
        "auth_required": config.auth_token.is_some(),
        "tools": all_tools().len(),
        "endpoints": {
            "mcp": "POST /mcp",
            "health": "GET /health",
        },
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// One JSON-RPC message in, at most one out; notifications get 202.
async fn mcp_endpoint(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    body: String,
) -> Result<Response<Body>, AppError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);
    let span = tracing::debug_span!("mcp_message", request_id = request_id.as_deref());

    let response = match state.mcp().respond(&body).instrument(span).await? {
        Some(response) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            response,
        )
            .into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    };
    Ok(response)
}
