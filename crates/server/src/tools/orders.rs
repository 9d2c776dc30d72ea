//! Order tools.

use serde_json::json;

use super::{ORDERS_DOMAIN, Tool, ToolAnnotations};

const ORDER_ID_DESCRIPTION: &str = "The order number (e.g., 'ORD-1001-D'). Demo orders end in a \
    status letter: D delivered, S shipped, T in transit, P processing, R ready for pickup, \
    C cancelled, F failed, E not found; no letter means pending.";

const CUSTOMER_ID_DESCRIPTION: &str =
    "Customer ID of the person asking. When given, the order must belong to them.";

/// Get all order-related tools.
#[must_use]
pub fn order_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "get_order_status".to_string(),
            description: "Get the current status of an order. Returns the order's items, \
                total, shipping address, dates and tracking details when it has shipped."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": ORDER_ID_DESCRIPTION
                    },
                    "customer_id": {
                        "type": "string",
                        "description": CUSTOMER_ID_DESCRIPTION
                    }
                },
                "required": ["order_id"]
            }),
            annotations: ToolAnnotations::READ_ONLY,
            domain: Some(ORDERS_DOMAIN.to_string()),
        },
        Tool {
            name: "get_customer_orders".to_string(),
            description: "List a customer's recent orders, newest first, with status, date, \
                total, item count and tracking number. Use it when the customer does not \
                know their order number."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "customer_id": {
                        "type": "string",
                        "description": "Customer ID whose orders to list (e.g., 'CUST-101')"
                    },
                    "status": {
                        "type": "string",
                        "enum": [
                            "pending", "processing", "ready_for_pickup", "shipped",
                            "in_transit", "delivered", "cancelled", "failed"
                        ],
                        "description": "Only list orders in this status"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 20,
                        "description": "Most orders to list (default 10)"
                    }
                },
                "required": ["customer_id"]
            }),
            annotations: ToolAnnotations::READ_ONLY,
            domain: Some(ORDERS_DOMAIN.to_string()),
        },
        Tool {
            name: "cancel_order".to_string(),
            description: "Cancel an order that has not shipped yet (pending, processing or \
                ready for pickup). Orders that have shipped must be returned instead."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": ORDER_ID_DESCRIPTION
                    },
                    "reason": {
                        "type": "string",
                        "description": "Why the customer is cancelling (max 500 characters, default 'Customer requested')",
                        "maxLength": 500
                    },
                    "customer_id": {
                        "type": "string",
                        "description": CUSTOMER_ID_DESCRIPTION
                    }
                },
                "required": ["order_id"]
            }),
            annotations: ToolAnnotations::DESTRUCTIVE,
            domain: Some(ORDERS_DOMAIN.to_string()),
        },
        Tool {
            name: "process_return".to_string(),
            description: "Start a return for a delivered order. Returns the whole order unless \
                specific items are listed, and reports the return ID and refund amount."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": ORDER_ID_DESCRIPTION
                    },
                    "item_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Line item IDs or SKUs to return (omit to return everything)"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Why the items are being returned (max 500 characters, default 'Customer return')",
                        "maxLength": 500
                    },
                    "customer_id": {
                        "type": "string",
                        "description": CUSTOMER_ID_DESCRIPTION
                    }
                },
                "required": ["order_id"]
            }),
            annotations: ToolAnnotations::DESTRUCTIVE,
            domain: Some(ORDERS_DOMAIN.to_string()),
        },
        Tool {
            name: "track_package".to_string(),
            description: "Get carrier tracking for a shipped order: carrier, tracking number \
                and link, estimated delivery and scan history."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {
                        "type": "string",
                        "description": ORDER_ID_DESCRIPTION
                    },
                    "customer_id": {
                        "type": "string",
                        "description": CUSTOMER_ID_DESCRIPTION
                    }
                },
                "required": ["order_id"]
            }),
            annotations: ToolAnnotations::READ_ONLY,
            domain: Some(ORDERS_DOMAIN.to_string()),
        },
    ]
}
