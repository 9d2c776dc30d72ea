//! Tool definitions and dispatch.
//!
//! Two domains of tools are exposed:
//!
//! **Order tools (4):** look up, cancel, return and track orders through the
//! [`ValidationLayer`]. Cancel and return are the only tools that change
//! anything.
//!
//! **Support tools (10):** read-only lookups over the static
//! [`SupportContent`].

mod executor;
mod orders;
mod support;

pub use orders::order_tools;
pub use support::support_tools;

use parcel_desk_core::ValidationLayer;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::content::SupportContent;

/// Domain of the order tools.
pub const ORDERS_DOMAIN: &str = "orders";

/// Domain of the support-information tools.
pub const SUPPORT_DOMAIN: &str = "support";

/// A tool as advertised to MCP clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Name of the tool.
    pub name: String,
    /// Description of what the tool does.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
    /// Behaviour hints for clients.
    pub annotations: ToolAnnotations,
    /// Domain the tool belongs to (internal, not sent to clients).
    #[serde(skip)]
    pub domain: Option<String>,
}

/// MCP tool annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub read_only_hint: bool,
    pub destructive_hint: bool,
}

impl ToolAnnotations {
    /// A tool that only reads.
    pub const READ_ONLY: Self = Self {
        read_only_hint: true,
        destructive_hint: false,
    };

    /// A tool that changes order state.
    pub const DESTRUCTIVE: Self = Self {
        read_only_hint: false,
        destructive_hint: true,
    };
}

impl Tool {
    /// Whether the tool only reads.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.annotations.read_only_hint
    }
}

/// Get all tools (15 total: 5 order tools followed by 10 support tools).
#[must_use]
pub fn all_tools() -> Vec<Tool> {
    let mut tools = Vec::with_capacity(15);
    tools.extend(order_tools());
    tools.extend(support_tools());
    tools
}

/// Get a tool by name.
#[must_use]
pub fn get_tool_by_name(name: &str) -> Option<Tool> {
    all_tools().into_iter().find(|t| t.name == name)
}

/// Get all tools for a specific domain.
#[must_use]
pub fn get_tools_by_domain(domain: &str) -> Vec<Tool> {
    all_tools()
        .into_iter()
        .filter(|t| t.domain.as_deref() == Some(domain))
        .collect()
}

/// Get tool names from a list of tools.
#[must_use]
pub fn get_tool_names(tools: &[Tool]) -> Vec<&str> {
    tools.iter().map(|t| t.name.as_str()).collect()
}

/// Errors that stop a tool from producing any result.
///
/// Business failures such as an order that cannot be cancelled are not
/// errors here; they come back as [`ToolResult::Rejected`].
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of tool execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// The tool answered.
    Success(Value),
    /// The request was refused; the value carries an `error_code` and `message`.
    Rejected(Value),
}

impl ToolResult {
    /// Whether the request was refused.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The JSON payload.
    #[must_use]
    pub const fn value(&self) -> &Value {
        match self {
            Self::Success(value) | Self::Rejected(value) => value,
        }
    }

    /// Take the JSON payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Success(value) | Self::Rejected(value) => value,
        }
    }
}

/// Executor for the support tools.
///
/// Maps tool names to order operations and content lookups. Holds borrows
/// only, so one is cheap to build per request.
pub struct ToolExecutor<'a> {
    orders: &'a ValidationLayer,
    content: &'a SupportContent,
}

impl<'a> ToolExecutor<'a> {
    /// Create a new tool executor.
    #[must_use]
    pub const fn new(orders: &'a ValidationLayer, content: &'a SupportContent) -> Self {
        Self { orders, content }
    }

    /// Execute a tool.
    ///
    /// # Arguments
    ///
    /// * `name` - Tool name
    /// * `input` - Tool arguments as a JSON object (`null` means no arguments)
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for a name not in [`all_tools`].
    #[instrument(skip(self, input), fields(tool_name = %name))]
    pub async fn execute(&self, name: &str, input: &Value) -> Result<ToolResult, ToolError> {
        let result = match name {
            // Orders
            "get_order_status" => self.get_order_status(input).await,
            "get_customer_orders" => self.get_customer_orders(input).await,
            "cancel_order" => self.cancel_order(input).await,
            "process_return" => self.process_return(input).await,
            "track_package" => self.track_package(input).await,

            // Support information
            "get_support_info" => self.get_support_info(input),
            "get_return_policy" => self.get_return_policy(input),
            "get_shipping_info" => self.get_shipping_info(input),
            "get_contact_information" => self.get_contact_information(input),
            "get_size_guide" => self.get_size_guide(input),
            "get_warranty_information" => self.get_warranty_information(input),
            "get_product_care_info" => self.get_product_care_info(input),
            "get_payment_information" => self.get_payment_information(input),
            "get_account_help" => self.get_account_help(input),
            "get_loyalty_program_info" => self.get_loyalty_program_info(input),

            _ => Err(ToolError::UnknownTool(name.to_string())),
        }?;

        debug!(is_error = result.is_error(), "Tool finished");
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tools_count() {
        let tools = all_tools();
        assert_eq!(tools.len(), 15);
    }

    #[test]
    fn test_tool_names_unique() {
        let tools = all_tools();
        let mut names = get_tool_names(&tools);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn test_get_tool_by_name() {
        let tool = get_tool_by_name("cancel_order");
        assert!(tool.is_some_and(|t| !t.is_read_only()));
        assert!(get_tool_by_name("nonexistent_tool").is_none());
    }

    #[test]
    fn test_get_tools_by_domain() {
        let orders = get_tools_by_domain(ORDERS_DOMAIN);
        assert_eq!(
            get_tool_names(&orders),
            vec![
                "get_order_status",
                "get_customer_orders",
                "cancel_order",
                "process_return",
                "track_package"
            ]
        );
        assert_eq!(get_tools_by_domain(SUPPORT_DOMAIN).len(), 10);
        assert!(get_tools_by_domain("billing").is_empty());
    }

    #[test]
    fn test_only_cancel_and_return_are_destructive() {
        let destructive: Vec<String> = all_tools()
            .into_iter()
            .filter(|t| t.annotations.destructive_hint)
            .map(|t| t.name)
            .collect();
        assert_eq!(destructive, vec!["cancel_order", "process_return"]);
    }

    #[test]
    fn test_tool_serializes_for_mcp() {
        let Some(tool) = get_tool_by_name("track_package") else {
            panic!("track_package missing");
        };
        let value = serde_json::to_value(&tool).unwrap_or_default();
        assert_eq!(value["name"], "track_package");
        assert_eq!(value["inputSchema"]["required"][0], "order_id");
        assert_eq!(value["annotations"]["readOnlyHint"], true);
        assert_eq!(value["annotations"]["destructiveHint"], false);
        assert!(value.get("domain").is_none());
    }

    #[test]
    fn test_every_schema_is_an_object() {
        for tool in all_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(!tool.description.is_empty(), "{}", tool.name);
        }
    }
}
