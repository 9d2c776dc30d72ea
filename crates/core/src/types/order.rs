//! Order domain records returned by platforms.
//!
//! Records are plain values. They are built fresh for every call and handed to
//! the caller; nothing keeps a reference to them afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CustomerId, ReturnId};
use super::price::Price;
use super::status::{BehaviorTag, ReturnStatus};

// =============================================================================
// Orders
// =============================================================================

/// A single order as seen by the support agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Identifier as supplied by the caller.
    pub order_id: String,
    /// Owner of the order.
    pub customer_id: CustomerId,
    /// Lifecycle state.
    pub status: BehaviorTag,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order last changed.
    pub updated_at: DateTime<Utc>,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Sum of all line totals.
    pub total: Price,
    /// Delivery address.
    pub shipping_address: Address,
    /// Address the payment method is registered to.
    pub billing_address: Address,
    /// Carrier tracking, when the order has shipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingInfo>,
}

impl OrderRecord {
    /// Find a line item by its line id or SKU.
    #[must_use]
    pub fn find_item(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(item_id))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// One line of a customer's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub status: BehaviorTag,
    pub created_at: DateTime<Utc>,
    pub total: Price,
    /// Units across all lines.
    pub item_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl From<&OrderRecord> for OrderSummary {
    fn from(record: &OrderRecord) -> Self {
        Self {
            order_id: record.order_id.clone(),
            status: record.status,
            created_at: record.created_at,
            total: record.total,
            item_count: record.unit_count(),
            tracking_number: record
                .tracking
                .as_ref()
                .map(|tracking| tracking.tracking_number.clone()),
        }
    }
}

/// A customer's recent orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrders {
    pub customer_id: CustomerId,
    pub orders: Vec<OrderSummary>,
}

/// A line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identifier, unique within the order (e.g. `ORD-1001-D-L1`).
    pub line_id: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Price,
}

impl LineItem {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    /// Whether `item_id` names this line, by line id or SKU.
    #[must_use]
    pub fn matches(&self, item_id: &str) -> bool {
        self.line_id == item_id || self.sku == item_id
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line_1: String,
    pub city: String,
    pub region: String,
    pub postcode: String,
    pub country: String,
}

// =============================================================================
// Tracking
// =============================================================================

/// Carrier tracking for a shipped order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Carrier name (UPS, `FedEx`, ...).
    pub carrier: String,
    /// Carrier tracking number.
    pub tracking_number: String,
    /// Public tracking page.
    pub tracking_url: String,
    /// Order state the tracking reflects.
    pub status: BehaviorTag,
    /// Expected delivery time, if not yet delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// Location of the most recent scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_location: Option<String>,
    /// Scan history, oldest first.
    pub events: Vec<TrackingEvent>,
}

/// A single carrier scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

// =============================================================================
// Actions
// =============================================================================

/// Outcome of a mutating operation (cancel, return).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the action went through.
    pub success: bool,
    /// Order the action targeted.
    pub order_id: String,
    /// Order state after the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_status: Option<BehaviorTag>,
    /// Human-readable outcome.
    pub message: String,
    /// Stable error code on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Order as it stands after the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<OrderRecord>,
    /// Return request created by the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_details: Option<ReturnDetails>,
}

impl ActionResult {
    /// A successful action that left the order in `record`'s state.
    #[must_use]
    pub fn succeeded(record: OrderRecord, message: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: record.order_id.clone(),
            new_status: Some(record.status),
            message: message.into(),
            error_code: None,
            record: Some(record),
            return_details: None,
        }
    }

    /// A failed action.
    #[must_use]
    pub fn failed(
        order_id: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            order_id: order_id.into(),
            new_status: None,
            message: message.into(),
            error_code: Some(error_code.into()),
            record: None,
            return_details: None,
        }
    }

    /// Attach the return request created by this action.
    #[must_use]
    pub fn with_return(mut self, details: ReturnDetails) -> Self {
        self.return_details = Some(details);
        self
    }
}

/// A return request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDetails {
    pub return_id: ReturnId,
    pub status: ReturnStatus,
    pub reason: String,
    /// Line ids being returned.
    pub items: Vec<String>,
    pub refund_amount: Price,
}
