//! Parcel Desk server.
//!
//! Exposes the customer-support tools over the Model Context Protocol.
//!
//! # Architecture
//!
//! - [`tools`] - the 15 tool definitions and the executor that runs them
//! - [`content`] - static reference content behind the information tools
//! - [`mcp`] - JSON-RPC handling and the stdio transport
//! - [`routes`] - the axum HTTP transport
//! - [`config`] - environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod mcp;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tools;

pub use config::{ConfigError, LogFormat, ServerConfig, Transport};
pub use content::{ContentError, SupportContent};
pub use error::AppError;
pub use mcp::McpHandler;
pub use state::{AppState, build_handler};
pub use tools::{Tool, ToolError, ToolExecutor, ToolResult};
