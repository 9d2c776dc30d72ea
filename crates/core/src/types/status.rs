//! Order lifecycle states and the behaviour table derived from them.
//!
//! Every order state is a [`BehaviorTag`]. What an order in that state can do
//! (carry tracking, be cancelled, be returned) is read from a single constant
//! table, [`STATUS_PROFILES`], rather than from conditionals spread across the
//! engine and the validation layer. Adding a state means adding one enum
//! variant and one table row.

use serde::{Deserialize, Serialize};

/// Canonical lifecycle state of an order, derived from its identifier suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorTag {
    /// No suffix: the order has been placed but nothing has happened yet.
    #[default]
    Pending,
    /// `P`: the warehouse is preparing the order.
    Processing,
    /// `R`: the order is waiting at a pickup point.
    ReadyForPickup,
    /// `S`: handed to a carrier, no scans yet.
    Shipped,
    /// `T`: moving through the carrier network.
    InTransit,
    /// `D`: delivered to the customer.
    Delivered,
    /// `C`: cancelled before fulfilment.
    Cancelled,
    /// `F`: fulfilment failed.
    Failed,
    /// `E`: the backend reports no such order.
    NotFound,
}

impl BehaviorTag {
    /// All tags in table order.
    pub const ALL: [Self; 9] = [
        Self::Pending,
        Self::Processing,
        Self::ReadyForPickup,
        Self::Shipped,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
        Self::Failed,
        Self::NotFound,
    ];

    /// Resolve a suffix letter (case-insensitive) to its tag.
    ///
    /// Returns `None` for letters outside the known set.
    #[must_use]
    pub fn from_suffix(suffix: char) -> Option<Self> {
        let upper = suffix.to_ascii_uppercase();
        STATUS_PROFILES
            .iter()
            .find(|profile| profile.suffix == Some(upper))
            .map(|profile| profile.tag)
    }

    /// The behaviour row for this tag.
    #[must_use]
    pub fn profile(self) -> &'static StatusProfile {
        // Rows are declared in discriminant order; see `profiles_are_in_discriminant_order`.
        #[allow(clippy::indexing_slicing)]
        &STATUS_PROFILES[self as usize]
    }

    /// Canonical suffix letter, `None` for [`BehaviorTag::Pending`].
    #[must_use]
    pub fn suffix(self) -> Option<char> {
        self.profile().suffix
    }

    /// Human-readable label used in customer-facing messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Whether an order in this state can no longer change.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.profile().terminal
    }

    /// Whether an order in this state may be cancelled.
    #[must_use]
    pub fn is_cancellable(self) -> bool {
        self.profile().cancellable
    }

    /// Whether an order in this state may be returned.
    #[must_use]
    pub fn is_returnable(self) -> bool {
        self.profile().returnable
    }

    /// Shape of the tracking data an order in this state carries.
    #[must_use]
    pub fn tracking_shape(self) -> TrackingShape {
        self.profile().tracking
    }
}

impl std::fmt::Display for BehaviorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What tracking data an order carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingShape {
    /// No tracking yet.
    None,
    /// Carrier and tracking number, but no scans.
    CarrierOnly,
    /// At least one location scan.
    WithEvents,
    /// Full scan history ending in a delivery event.
    Delivered,
}

impl TrackingShape {
    /// Whether any tracking data exists.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One row of the behaviour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProfile {
    /// The state this row describes.
    pub tag: BehaviorTag,
    /// Identifier suffix that selects this state.
    pub suffix: Option<char>,
    /// Label for messages.
    pub label: &'static str,
    /// Tracking data carried by the order.
    pub tracking: TrackingShape,
    /// The order can no longer change.
    pub terminal: bool,
    /// The order may be cancelled.
    pub cancellable: bool,
    /// The order may be returned.
    pub returnable: bool,
}

/// The behaviour table, in [`BehaviorTag`] discriminant order.
///
/// `NotFound` is listed for completeness only: operations on it fail before
/// any row is consulted.
pub const STATUS_PROFILES: [StatusProfile; 9] = [
    StatusProfile {
        tag: BehaviorTag::Pending,
        suffix: None,
        label: "Pending",
        tracking: TrackingShape::None,
        terminal: false,
        cancellable: true,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::Processing,
        suffix: Some('P'),
        label: "Processing",
        tracking: TrackingShape::None,
        terminal: false,
        cancellable: true,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::ReadyForPickup,
        suffix: Some('R'),
        label: "Ready for Pickup",
        tracking: TrackingShape::None,
        terminal: false,
        cancellable: true,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::Shipped,
        suffix: Some('S'),
        label: "Shipped",
        tracking: TrackingShape::CarrierOnly,
        terminal: false,
        cancellable: false,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::InTransit,
        suffix: Some('T'),
        label: "In Transit",
        tracking: TrackingShape::WithEvents,
        terminal: false,
        cancellable: false,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::Delivered,
        suffix: Some('D'),
        label: "Delivered",
        tracking: TrackingShape::Delivered,
        terminal: true,
        cancellable: false,
        returnable: true,
    },
    StatusProfile {
        tag: BehaviorTag::Cancelled,
        suffix: Some('C'),
        label: "Cancelled",
        tracking: TrackingShape::None,
        terminal: true,
        cancellable: false,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::Failed,
        suffix: Some('F'),
        label: "Failed",
        tracking: TrackingShape::None,
        terminal: true,
        cancellable: false,
        returnable: false,
    },
    StatusProfile {
        tag: BehaviorTag::NotFound,
        suffix: Some('E'),
        label: "Not Found",
        tracking: TrackingShape::None,
        terminal: false,
        cancellable: false,
        returnable: false,
    },
];

/// Status of a return request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    #[default]
    Initiated,
}
