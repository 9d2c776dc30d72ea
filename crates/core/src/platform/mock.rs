//! Mock platform backed by [`MockStateEngine`].

use async_trait::async_trait;
use tracing::debug;

use crate::engine::MockStateEngine;
use crate::error::SupportError;
use crate::platform::CommercePlatform;
use crate::types::{ActionResult, BehaviorTag, OrderIdentifier, OrderRecord, TrackingInfo};

/// In-memory platform whose orders are synthesized from their identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPlatform {
    engine: MockStateEngine,
}

impl MockPlatform {
    /// A platform anchored at the start of the current UTC day.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(MockStateEngine::new())
    }

    /// A platform using a specific engine, typically one with a fixed anchor.
    #[must_use]
    pub const fn with_engine(engine: MockStateEngine) -> Self {
        Self { engine }
    }

    /// The underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &MockStateEngine {
        &self.engine
    }

    fn resolve(
        &self,
        order_id: &str,
        customer_id: Option<&str>,
    ) -> Result<OrderRecord, SupportError> {
        let id = OrderIdentifier::classify(order_id);
        if id.tag() == BehaviorTag::NotFound {
            return Err(SupportError::NotFound {
                order_id: order_id.to_owned(),
            });
        }
        debug!(order_id, status = ?id.tag(), "synthesized mock order");
        Ok(self.engine.record_for(&id, customer_id))
    }
}

#[async_trait]
impl CommercePlatform for MockPlatform {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_order(
        &self,
        order_id: &str,
        customer_id: Option<&str>,
    ) -> Result<OrderRecord, SupportError> {
        self.resolve(order_id, customer_id)
    }

    async fn get_customer_orders(
        &self,
        customer_id: &str,
        status: Option<BehaviorTag>,
    ) -> Result<Vec<OrderRecord>, SupportError> {
        let mut orders = self.engine.customer_orders(customer_id);
        if let Some(status) = status {
            orders.retain(|record| record.status == status);
        }
        debug!(customer_id, count = orders.len(), "synthesized customer history");
        Ok(orders)
    }

    async fn cancel_order(
        &self,
        order_id: &str,
        reason: &str,
        customer_id: Option<&str>,
    ) -> Result<ActionResult, SupportError> {
        let record = self.resolve(order_id, customer_id)?;
        if !record.status.is_cancellable() {
            return Err(SupportError::NotCancellable {
                order_id: order_id.to_owned(),
                status: record.status,
            });
        }

        let cancelled = self.engine.cancelled(record);
        let message = format!("Order {order_id} has been cancelled. Reason: {reason}");
        Ok(ActionResult::succeeded(cancelled, message))
    }

    async fn initiate_return(
        &self,
        order_id: &str,
        item_ids: &[String],
        reason: &str,
        customer_id: Option<&str>,
    ) -> Result<ActionResult, SupportError> {
        let record = self.resolve(order_id, customer_id)?;
        if !record.status.is_returnable() {
            return Err(SupportError::NotReturnable {
                order_id: order_id.to_owned(),
                status: record.status,
            });
        }

        let mut line_ids = Vec::with_capacity(item_ids.len());
        let mut unknown = Vec::new();
        for item_id in item_ids {
            match record.find_item(item_id) {
                Some(item) if !line_ids.contains(&item.line_id) => {
                    line_ids.push(item.line_id.clone());
                }
                Some(_) => {}
                None => unknown.push(item_id.clone()),
            }
        }
        if !unknown.is_empty() {
            return Err(SupportError::UnknownItem {
                order_id: order_id.to_owned(),
                item_ids: unknown,
            });
        }

        let (record, details) = self.engine.returned(record, &line_ids, reason);
        let message = format!(
            "Return {} initiated for order {order_id}. A refund of {} will be issued once the items are received.",
            details.return_id, details.refund_amount
        );
        Ok(ActionResult::succeeded(record, message).with_return(details))
    }

    async fn track_package(
        &self,
        order_id: &str,
        customer_id: Option<&str>,
    ) -> Result<TrackingInfo, SupportError> {
        let record = self.resolve(order_id, customer_id)?;
        let status = record.status;
        record.tracking.ok_or_else(|| SupportError::NotTracked {
            order_id: order_id.to_owned(),
            status,
        })
    }
}
