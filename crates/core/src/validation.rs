//! Validation layer in front of a [`CommercePlatform`].
//!
//! Every order operation runs the same checks in a fixed order and stops at
//! the first failure:
//!
//! 1. Argument shape: order id present, reason and item list well formed.
//! 2. Ownership: when the caller names a customer, the order must belong to them.
//! 3. Delegation to the platform, whose errors pass through unchanged.
//!
//! Customer history lookups have no order to own, so only step 1 applies:
//! the customer id is required and the page size is bounded.
//!
//! The layer holds no state between calls.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::error::SupportError;
use crate::platform::CommercePlatform;
use crate::types::{
    ActionResult, BehaviorTag, CustomerId, CustomerOrders, OrderRecord, OrderSummary, TrackingInfo,
};

/// Longest accepted free-text reason, in characters.
pub const MAX_REASON_CHARS: usize = 500;

/// Reason recorded when a cancellation does not give one.
pub const DEFAULT_CANCEL_REASON: &str = "Customer requested";

/// Reason recorded when a return does not give one.
pub const DEFAULT_RETURN_REASON: &str = "Customer return";

/// Orders listed when a history lookup does not set a limit.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Most orders a single history lookup may list.
pub const MAX_HISTORY_LIMIT: usize = 20;

/// Customer id that agents send when they have no real one.
const PLACEHOLDER_CUSTOMER: &str = "default";

// =============================================================================
// Arguments
// =============================================================================

/// Arguments for an order lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetOrderArgs {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Arguments for a customer's order history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCustomerOrdersArgs {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub status: Option<BehaviorTag>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Arguments for a cancellation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelOrderArgs {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Arguments for a return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessReturnArgs {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub item_ids: Option<Vec<String>>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Arguments for a tracking lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackPackageArgs {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
}

// =============================================================================
// Layer
// =============================================================================

/// Checks arguments and ownership before handing a call to the platform.
#[derive(Clone)]
pub struct ValidationLayer {
    platform: Arc<dyn CommercePlatform>,
}

impl std::fmt::Debug for ValidationLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationLayer")
            .field("platform", &self.platform.name())
            .finish()
    }
}

impl ValidationLayer {
    /// Wrap a platform.
    #[must_use]
    pub fn new(platform: Arc<dyn CommercePlatform>) -> Self {
        Self { platform }
    }

    /// The wrapped platform.
    #[must_use]
    pub fn platform(&self) -> &Arc<dyn CommercePlatform> {
        &self.platform
    }

    /// Look up an order.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`], [`SupportError::NotFound`] or
    /// [`SupportError::OwnershipMismatch`].
    pub async fn get_order(&self, args: GetOrderArgs) -> Result<OrderRecord, SupportError> {
        self.checked_get_order(&args)
            .await
            .inspect_err(|err| log_rejection("get_order", &args.order_id, err))
    }

    /// List a customer's recent orders.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`] when the customer id is
    /// missing or the limit is out of range.
    pub async fn get_customer_orders(
        &self,
        args: GetCustomerOrdersArgs,
    ) -> Result<CustomerOrders, SupportError> {
        self.checked_get_customer_orders(&args)
            .await
            .inspect_err(|err| log_rejection("get_customer_orders", &args.customer_id, err))
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`], [`SupportError::NotFound`],
    /// [`SupportError::OwnershipMismatch`] or [`SupportError::NotCancellable`].
    pub async fn cancel_order(&self, args: CancelOrderArgs) -> Result<ActionResult, SupportError> {
        self.checked_cancel_order(&args)
            .await
            .inspect_err(|err| log_rejection("cancel_order", &args.order_id, err))
    }

    /// Start a return.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`], [`SupportError::NotFound`],
    /// [`SupportError::OwnershipMismatch`], [`SupportError::NotReturnable`] or
    /// [`SupportError::UnknownItem`].
    pub async fn process_return(
        &self,
        args: ProcessReturnArgs,
    ) -> Result<ActionResult, SupportError> {
        self.checked_process_return(&args)
            .await
            .inspect_err(|err| log_rejection("process_return", &args.order_id, err))
    }

    /// Look up carrier tracking.
    ///
    /// # Errors
    ///
    /// Returns [`SupportError::InvalidArgument`], [`SupportError::NotFound`],
    /// [`SupportError::OwnershipMismatch`] or [`SupportError::NotTracked`].
    pub async fn track_package(&self, args: TrackPackageArgs) -> Result<TrackingInfo, SupportError> {
        self.checked_track_package(&args)
            .await
            .inspect_err(|err| log_rejection("track_package", &args.order_id, err))
    }

    async fn checked_get_order(&self, args: &GetOrderArgs) -> Result<OrderRecord, SupportError> {
        let order_id = required_order_id(&args.order_id)?;
        let customer_id = supplied_customer(args.customer_id.as_deref());

        let record = self.platform.get_order(order_id, customer_id).await?;
        check_owner(&record, customer_id)?;
        Ok(record)
    }

    async fn checked_get_customer_orders(
        &self,
        args: &GetCustomerOrdersArgs,
    ) -> Result<CustomerOrders, SupportError> {
        let Some(customer_id) = supplied_customer(Some(&args.customer_id)) else {
            return Err(SupportError::invalid("customer_id is required"));
        };
        let limit = history_limit(args.limit)?;

        let records = self
            .platform
            .get_customer_orders(customer_id, args.status)
            .await?;
        Ok(CustomerOrders {
            customer_id: CustomerId::new(customer_id),
            orders: records.iter().take(limit).map(OrderSummary::from).collect(),
        })
    }

    async fn checked_cancel_order(
        &self,
        args: &CancelOrderArgs,
    ) -> Result<ActionResult, SupportError> {
        let order_id = required_order_id(&args.order_id)?;
        let reason = reason_or_default(args.reason.as_deref(), DEFAULT_CANCEL_REASON)?;
        let customer_id = supplied_customer(args.customer_id.as_deref());

        self.authorize(order_id, customer_id).await?;
        self.platform
            .cancel_order(order_id, reason, customer_id)
            .await
    }

    async fn checked_process_return(
        &self,
        args: &ProcessReturnArgs,
    ) -> Result<ActionResult, SupportError> {
        let order_id = required_order_id(&args.order_id)?;
        let item_ids = item_list(args.item_ids.as_deref())?;
        let reason = reason_or_default(args.reason.as_deref(), DEFAULT_RETURN_REASON)?;
        let customer_id = supplied_customer(args.customer_id.as_deref());

        self.authorize(order_id, customer_id).await?;
        self.platform
            .initiate_return(order_id, &item_ids, reason, customer_id)
            .await
    }

    async fn checked_track_package(
        &self,
        args: &TrackPackageArgs,
    ) -> Result<TrackingInfo, SupportError> {
        let order_id = required_order_id(&args.order_id)?;
        let customer_id = supplied_customer(args.customer_id.as_deref());

        self.authorize(order_id, customer_id).await?;
        self.platform.track_package(order_id, customer_id).await
    }

    /// Ownership check for operations that do not return the record itself.
    async fn authorize(&self, order_id: &str, customer_id: Option<&str>) -> Result<(), SupportError> {
        if customer_id.is_none() {
            return Ok(());
        }
        let record = self.platform.get_order(order_id, customer_id).await?;
        check_owner(&record, customer_id)
    }
}

fn required_order_id(raw: &str) -> Result<&str, SupportError> {
    let order_id = raw.trim();
    if order_id.is_empty() {
        return Err(SupportError::invalid("order_id is required"));
    }
    Ok(order_id)
}

fn supplied_customer(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty() && !id.eq_ignore_ascii_case(PLACEHOLDER_CUSTOMER))
}

fn history_limit(raw: Option<usize>) -> Result<usize, SupportError> {
    match raw {
        None => Ok(DEFAULT_HISTORY_LIMIT),
        Some(limit) if (1..=MAX_HISTORY_LIMIT).contains(&limit) => Ok(limit),
        Some(_) => Err(SupportError::invalid(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}"
        ))),
    }
}

fn reason_or_default<'a>(raw: Option<&'a str>, default: &'a str) -> Result<&'a str, SupportError> {
    let Some(reason) = raw else {
        return Ok(default);
    };
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(SupportError::invalid("reason must not be blank"));
    }
    if reason.chars().count() > MAX_REASON_CHARS {
        return Err(SupportError::invalid(format!(
            "reason must be at most {MAX_REASON_CHARS} characters"
        )));
    }
    Ok(reason)
}

fn item_list(raw: Option<&[String]>) -> Result<Vec<String>, SupportError> {
    let Some(items) = raw else {
        return Ok(Vec::new());
    };
    if items.is_empty() {
        return Err(SupportError::invalid(
            "item_ids must list at least one item when given",
        ));
    }
    items
        .iter()
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                Err(SupportError::invalid("item_ids must not contain blank entries"))
            } else {
                Ok(item.to_owned())
            }
        })
        .collect()
}

fn check_owner(record: &OrderRecord, customer_id: Option<&str>) -> Result<(), SupportError> {
    match customer_id {
        Some(customer) if record.customer_id.as_str() != customer => {
            Err(SupportError::OwnershipMismatch {
                order_id: record.order_id.clone(),
                customer_id: customer.to_owned(),
            })
        }
        _ => Ok(()),
    }
}

fn log_rejection(operation: &str, order_id: &str, err: &SupportError) {
    info!(
        operation,
        order_id,
        error_code = err.error_code(),
        "order request rejected: {err}"
    );
}
