//! Core types for Parcel Desk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod order_id;
pub mod price;
pub mod status;

pub use id::*;
pub use order::{
    ActionResult, Address, CustomerOrders, LineItem, OrderRecord, OrderSummary, ReturnDetails,
    TrackingEvent, TrackingInfo,
};
pub use order_id::OrderIdentifier;
pub use price::{CurrencyCode, Price};
pub use status::*;
