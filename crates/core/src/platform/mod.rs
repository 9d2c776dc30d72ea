//! Commerce platform abstraction.
//!
//! Every backend, mock or real, answers the same order operations. Callers
//! hold an `Arc<dyn CommercePlatform>` and never know which backend replied.
//!
//! Platforms receive arguments that have already been shape-checked by
//! [`crate::validation::ValidationLayer`]: order ids are trimmed and non-empty,
//! reasons are resolved to their defaults, and a customer id is only passed
//! when the caller actually supplied one.

pub mod mock;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SupportError;
use crate::types::{ActionResult, BehaviorTag, OrderRecord, TrackingInfo};

pub use mock::MockPlatform;

/// The order operations a commerce backend must provide.
#[async_trait]
pub trait CommercePlatform: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Fetch an order.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::NotFound`] if the backend has no such order.
    async fn get_order(
        &self,
        order_id: &str,
        customer_id: Option<&str>,
    ) -> Result<OrderRecord, SupportError>;

    /// A customer's orders, newest first, optionally limited to one status.
    ///
    /// A customer with no orders yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Backends that call out to a remote store may fail; the mock never does.
    async fn get_customer_orders(
        &self,
        customer_id: &str,
        status: Option<BehaviorTag>,
    ) -> Result<Vec<OrderRecord>, SupportError>;

    /// Cancel an order that has not shipped.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::NotFound`] or [`SupportError::NotCancellable`].
    async fn cancel_order(
        &self,
        order_id: &str,
        reason: &str,
        customer_id: Option<&str>,
    ) -> Result<ActionResult, SupportError>;

    /// Start a return for some or all items of a delivered order.
    ///
    /// An empty `item_ids` slice returns the whole order. Item ids match a
    /// line's id or its SKU.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::NotFound`], [`SupportError::NotReturnable`] or
    /// [`SupportError::UnknownItem`].
    async fn initiate_return(
        &self,
        order_id: &str,
        item_ids: &[String],
        reason: &str,
        customer_id: Option<&str>,
    ) -> Result<ActionResult, SupportError>;

    /// Carrier tracking for a shipped order.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::NotFound`] or [`SupportError::NotTracked`].
    async fn track_package(
        &self,
        order_id: &str,
        customer_id: Option<&str>,
    ) -> Result<TrackingInfo, SupportError>;
}

/// Backends that can be selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformKind {
    /// Deterministic in-memory orders.
    #[default]
    Mock,
}

impl PlatformKind {
    /// Instantiate the backend.
    #[must_use]
    pub fn build(self) -> Arc<dyn CommercePlatform> {
        match self {
            Self::Mock => Arc::new(MockPlatform::new()),
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            other => Err(format!("unknown platform '{other}' (expected: mock)")),
        }
    }
}
