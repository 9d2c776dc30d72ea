//! Tool executor implementations.
//!
//! Arguments are deserialized into typed structs; a value of the wrong type is
//! reported as an `invalid_argument` rejection rather than an execution error.

use chrono::Utc;
use parcel_desk_core::{
    ActionResult, CancelOrderArgs, GetCustomerOrdersArgs, GetOrderArgs, ProcessReturnArgs,
    SupportError, TrackPackageArgs,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::content::{
    AccountHelpArgs, ContactInfoArgs, LoyaltyInfoArgs, PaymentInfoArgs, ProductCareArgs,
    ReturnPolicyArgs, ShippingInfoArgs, SizeGuideArgs, SupportInfoArgs, WarrantyInfoArgs,
};

use super::{ToolError, ToolExecutor, ToolResult};

fn parse_args<T: DeserializeOwned + Default>(input: &Value) -> Result<T, SupportError> {
    if input.is_null() {
        return Ok(T::default());
    }
    T::deserialize(input).map_err(|e| SupportError::invalid(format!("Invalid arguments: {e}")))
}

/// Success serializes the payload, failure the error object.
fn render<T: Serialize>(result: Result<T, SupportError>) -> Result<ToolResult, ToolError> {
    match result {
        Ok(payload) => Ok(ToolResult::Success(serde_json::to_value(payload)?)),
        Err(err) => Ok(ToolResult::Rejected(serde_json::to_value(err.to_object())?)),
    }
}

/// Failed order actions keep the action result shape.
fn render_action(
    order_id: &str,
    result: Result<ActionResult, SupportError>,
) -> Result<ToolResult, ToolError> {
    match result {
        Ok(action) => Ok(ToolResult::Success(serde_json::to_value(action)?)),
        Err(err) => {
            let failed = ActionResult::failed(order_id.trim(), err.error_code(), err.to_string());
            Ok(ToolResult::Rejected(serde_json::to_value(failed)?))
        }
    }
}

fn raw_order_id(input: &Value) -> &str {
    input
        .get("order_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

// =============================================================================
// Order tools
// =============================================================================

impl ToolExecutor<'_> {
    pub(super) async fn get_order_status(&self, input: &Value) -> Result<ToolResult, ToolError> {
        let result = match parse_args::<GetOrderArgs>(input) {
            Ok(args) => self.orders.get_order(args).await,
            Err(err) => Err(err),
        };
        render(result)
    }

    pub(super) async fn get_customer_orders(
        &self,
        input: &Value,
    ) -> Result<ToolResult, ToolError> {
        let result = match parse_args::<GetCustomerOrdersArgs>(input) {
            Ok(args) => self.orders.get_customer_orders(args).await,
            Err(err) => Err(err),
        };
        render(result)
    }

    pub(super) async fn cancel_order(&self, input: &Value) -> Result<ToolResult, ToolError> {
        let result = match parse_args::<CancelOrderArgs>(input) {
            Ok(args) => self.orders.cancel_order(args).await,
            Err(err) => Err(err),
        };
        render_action(raw_order_id(input), result)
    }

    pub(super) async fn process_return(&self, input: &Value) -> Result<ToolResult, ToolError> {
        let result = match parse_args::<ProcessReturnArgs>(input) {
            Ok(args) => self.orders.process_return(args).await,
            Err(err) => Err(err),
        };
        render_action(raw_order_id(input), result)
    }

    pub(super) async fn track_package(&self, input: &Value) -> Result<ToolResult, ToolError> {
        let result = match parse_args::<TrackPackageArgs>(input) {
            Ok(args) => self.orders.track_package(args).await,
            Err(err) => Err(err),
        };
        render(result)
    }
}

// =============================================================================
// Support tools
// =============================================================================

impl ToolExecutor<'_> {
    pub(super) fn get_support_info(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(parse_args::<SupportInfoArgs>(input).map(|args| self.content.support_info(&args)))
    }

    pub(super) fn get_return_policy(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(parse_args::<ReturnPolicyArgs>(input).map(|args| self.content.return_policy(&args)))
    }

    pub(super) fn get_shipping_info(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(
            parse_args::<ShippingInfoArgs>(input).and_then(|args| self.content.shipping_info(&args)),
        )
    }

    pub(super) fn get_contact_information(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(
            parse_args::<ContactInfoArgs>(input)
                .map(|args| self.content.contact_information(&args)),
        )
    }

    pub(super) fn get_size_guide(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(parse_args::<SizeGuideArgs>(input).and_then(|args| self.content.size_guide(&args)))
    }

    pub(super) fn get_warranty_information(&self, input: &Value) -> Result<ToolResult, ToolError> {
        let today = Utc::now().date_naive();
        render(
            parse_args::<WarrantyInfoArgs>(input)
                .and_then(|args| self.content.warranty_information(&args, today)),
        )
    }

    pub(super) fn get_product_care_info(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(parse_args::<ProductCareArgs>(input).and_then(|args| self.content.product_care(&args)))
    }

    pub(super) fn get_payment_information(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(
            parse_args::<PaymentInfoArgs>(input)
                .map(|args| self.content.payment_information(&args)),
        )
    }

    pub(super) fn get_account_help(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(parse_args::<AccountHelpArgs>(input).and_then(|args| self.content.account_help(&args)))
    }

    pub(super) fn get_loyalty_program_info(&self, input: &Value) -> Result<ToolResult, ToolError> {
        render(
            parse_args::<LoyaltyInfoArgs>(input)
                .map(|args| self.content.loyalty_program_info(&args)),
        )
    }
}
