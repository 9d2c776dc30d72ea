//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Bearer auth (on `/mcp` only)

pub mod auth;
pub mod request_id;

pub use auth::require_bearer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
