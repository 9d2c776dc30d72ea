//! Application state shared across handlers.

use std::sync::Arc;

use parcel_desk_core::ValidationLayer;

use crate::config::ServerConfig;
use crate::content::{ContentError, SupportContent};
use crate::mcp::McpHandler;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    mcp: McpHandler,
}

impl AppState {
    /// Create a new application state from an already built handler.
    #[must_use]
    pub fn new(config: ServerConfig, mcp: McpHandler) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, mcp }),
        }
    }

    /// Build the platform and load the support content named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content override cannot be loaded.
    pub fn from_config(config: ServerConfig) -> Result<Self, ContentError> {
        let mcp = build_handler(&config)?;
        Ok(Self::new(config, mcp))
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the MCP handler.
    #[must_use]
    pub fn mcp(&self) -> &McpHandler {
        &self.inner.mcp
    }
}

/// Wire the configured platform and content into an MCP handler.
///
/// # Errors
///
/// Returns an error if the content override cannot be loaded.
pub fn build_handler(config: &ServerConfig) -> Result<McpHandler, ContentError> {
    let content = SupportContent::load(config.content_path.as_deref())?;
    let orders = ValidationLayer::new(config.platform.build());
    Ok(McpHandler::new(orders, Arc::new(content)))
}
