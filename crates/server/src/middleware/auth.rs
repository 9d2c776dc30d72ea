//! Bearer-token protection for the MCP endpoint.
//!
//! When `PARCEL_DESK_AUTH_TOKEN` is unset every request passes; otherwise the
//! `Authorization: Bearer <token>` header must match in constant time.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Extract the token from an `Authorization` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn tokens_match(expected: &str, presented: &str) -> bool {
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

/// Middleware that rejects requests without the configured bearer token.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when the token is missing or wrong.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config().auth_token.as_ref() else {
        return Ok(next.run(request).await);
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    match presented {
        Some(token) if tokens_match(expected.expose_secret(), token) => Ok(next.run(request).await),
        Some(_) => {
            warn!(path = %request.uri().path(), "Rejected request with wrong bearer token");
            Err(AppError::Unauthorized("invalid bearer token".to_string()))
        }
        None => Err(AppError::Unauthorized("missing bearer token".to_string())),
    }
}
