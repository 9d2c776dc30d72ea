//! Error taxonomy shared by every platform and the validation layer.
//!
//! Every failure reaches the tool dispatcher as one of these variants. None
//! are fatal and none are retried: the operations are deterministic, so a
//! retry would produce the same answer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::BehaviorTag;

/// Errors surfaced by order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    /// A required argument is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The platform has no such order.
    #[error("Order {order_id} was not found")]
    NotFound {
        /// The requested order.
        order_id: String,
    },

    /// The caller is not the owner of the order.
    #[error("Order {order_id} does not belong to customer {customer_id}")]
    OwnershipMismatch {
        /// The requested order.
        order_id: String,
        /// The customer that asked.
        customer_id: String,
    },

    /// The order's state forbids cancellation.
    #[error("Order {order_id} cannot be cancelled because it is {}", .status.label())]
    NotCancellable {
        /// The requested order.
        order_id: String,
        /// Its current state.
        status: BehaviorTag,
    },

    /// The order's state forbids returns.
    #[error("Order {order_id} cannot be returned because it is {}", .status.label())]
    NotReturnable {
        /// The requested order.
        order_id: String,
        /// Its current state.
        status: BehaviorTag,
    },

    /// The order has no tracking yet.
    #[error("Order {order_id} has no tracking information yet because it is {}", .status.label())]
    NotTracked {
        /// The requested order.
        order_id: String,
        /// Its current state.
        status: BehaviorTag,
    },

    /// Requested return items are not on the order.
    #[error("Order {order_id} has no item(s): {}", .item_ids.join(", "))]
    UnknownItem {
        /// The requested order.
        order_id: String,
        /// The offending item ids.
        item_ids: Vec<String>,
    },

    /// A remote platform failed to answer.
    #[error("Commerce backend error: {0}")]
    Backend(String),
}

impl SupportError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound { .. } => "order_not_found",
            Self::OwnershipMismatch { .. } => "ownership_mismatch",
            Self::NotCancellable { .. } => "not_cancellable",
            Self::NotReturnable { .. } => "not_returnable",
            Self::NotTracked { .. } => "not_tracked",
            Self::UnknownItem { .. } => "unknown_item",
            Self::Backend(_) => "backend_error",
        }
    }

    /// Shorthand for [`SupportError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Structured form for the tool result.
    #[must_use]
    pub fn to_object(&self) -> ErrorObject {
        ErrorObject {
            error_code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Serializable error envelope: a stable code plus a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub error_code: String,
    pub message: String,
}

impl From<&SupportError> for ErrorObject {
    fn from(err: &SupportError) -> Self {
        err.to_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_current_status() {
        let err = SupportError::NotCancellable {
            order_id: "ORD-1002-S".to_string(),
            status: BehaviorTag::Shipped,
        };
        assert_eq!(
            err.to_string(),
            "Order ORD-1002-S cannot be cancelled because it is Shipped"
        );

        let err = SupportError::NotTracked {
            order_id: "ORD-1005-R".to_string(),
            status: BehaviorTag::ReadyForPickup,
        };
        assert!(err.to_string().contains("Ready for Pickup"));
    }

    #[test]
    fn test_unknown_item_lists_offenders() {
        let err = SupportError::UnknownItem {
            order_id: "ORD-1-D".to_string(),
            item_ids: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), "Order ORD-1-D has no item(s): A, B");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            SupportError::invalid("x"),
            SupportError::NotFound {
                order_id: String::new(),
            },
            SupportError::OwnershipMismatch {
                order_id: String::new(),
                customer_id: String::new(),
            },
            SupportError::NotCancellable {
                order_id: String::new(),
                status: BehaviorTag::Shipped,
            },
            SupportError::NotReturnable {
                order_id: String::new(),
                status: BehaviorTag::Shipped,
            },
            SupportError::NotTracked {
                order_id: String::new(),
                status: BehaviorTag::Pending,
            },
            SupportError::UnknownItem {
                order_id: String::new(),
                item_ids: vec![],
            },
            SupportError::Backend(String::new()),
        ];

        let mut codes: Vec<_> = errors.iter().map(SupportError::error_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_error_object() {
        let obj = SupportError::NotFound {
            order_id: "ORD-9999-E".to_string(),
        }
        .to_object();
        assert_eq!(obj.error_code, "order_not_found");
        assert_eq!(obj.message, "Order ORD-9999-E was not found");
    }
}
