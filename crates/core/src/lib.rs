//! Parcel Desk Core - order model, mock engine and platform contract.
//!
//! This crate is the part of Parcel Desk that decides what an order looks
//! like and what may be done to it:
//! - identifier classification: `ORD-1002-S` is a shipped order
//! - a deterministic mock engine that synthesizes order records and tracking
//!   from the identifier alone
//! - the [`CommercePlatform`] trait every backend implements, with a mock
//!   variant
//! - a [`ValidationLayer`] that checks arguments and ownership before a call
//!   reaches the platform
//!
//! # Architecture
//!
//! The core crate performs no I/O: no database, no HTTP clients, no files.
//! The `server` crate wraps it in a tool dispatcher and protocol transports.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, statuses, prices and order records
//! - [`engine`] - Mock order-state engine
//! - [`platform`] - Backend trait and implementations
//! - [`validation`] - Argument and ownership checks
//! - [`error`] - Error taxonomy with stable error codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod engine;
pub mod error;
pub mod platform;
pub mod types;
pub mod validation;

pub use engine::MockStateEngine;
pub use error::{ErrorObject, SupportError};
pub use platform::{CommercePlatform, MockPlatform, PlatformKind};
pub use types::*;
pub use validation::{
    CancelOrderArgs, GetCustomerOrdersArgs, GetOrderArgs, ProcessReturnArgs, TrackPackageArgs,
    ValidationLayer,
};
