//! Integration tests for Parcel Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p parcel-desk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_lifecycle` - Order tools driven through the tool executor
//! - `mcp_protocol` - JSON-RPC sessions against the MCP handler
//! - `http_transport` - The HTTP router, auth and request ids
//!
//! Everything runs in-process against the mock platform with a fixed clock,
//! so no services need to be running.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use parcel_desk_core::{MockPlatform, MockStateEngine, ValidationLayer};
use parcel_desk_server::{McpHandler, SupportContent, ToolError, ToolResult};
use serde_json::Value;

/// Clock used by every fixture.
#[must_use]
pub fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A handler over the mock platform with the fixed clock and built-in content.
///
/// # Panics
///
/// Panics if the built-in support content does not parse.
#[must_use]
pub fn anchored_handler() -> McpHandler {
    let engine = MockStateEngine::anchored_at(anchor());
    let content = SupportContent::embedded().expect("built-in support content parses");
    McpHandler::new(
        ValidationLayer::new(Arc::new(MockPlatform::with_engine(engine))),
        Arc::new(content),
    )
}

/// Run one tool through the handler's executor.
///
/// # Errors
///
/// Returns the executor's error for unknown tools.
pub async fn call_tool(
    handler: &McpHandler,
    name: &str,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    handler.executor().execute(name, &arguments).await
}
