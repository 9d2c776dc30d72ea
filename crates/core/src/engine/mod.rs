//! Deterministic mock order-state engine.
//!
//! Orders are never stored. Every read synthesizes the record again from the
//! identifier: the [`BehaviorTag`] fixes the record's shape and the identifier's
//! seed drives everything that varies between orders (items, dates, carrier,
//! address). Each concern draws from its own seeded stream, so tracking built
//! on its own matches the tracking embedded in a full record.
//!
//! Dates are offsets back from an anchor instant held by the engine. Two reads
//! through the same engine are identical; reads on the same UTC day are
//! identical across processes.

pub mod catalog;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::types::{
    Address, BehaviorTag, CurrencyCode, CustomerId, LineItem, OrderIdentifier, OrderRecord, Price,
    ReturnDetails, ReturnId, ReturnStatus, TrackingEvent, TrackingInfo, TrackingShape,
};

use self::catalog::{CARRIERS, CITIES, Carrier, HUBS, PRODUCTS, STREETS, WAREHOUSE};

/// Owner used when an identifier has no numeric part and no caller is known.
pub const GUEST_CUSTOMER: &str = "CUST-GUEST";

/// Independent random streams, one per derived concern.
#[derive(Debug, Clone, Copy)]
enum Stream {
    Items = 1,
    Dates = 2,
    Address = 3,
    Tracking = 4,
    Return = 5,
    Shipment = 6,
    Billing = 7,
    History = 8,
}

/// Order states a customer's history is drawn from. `E` never appears.
const HISTORY_SUFFIXES: &[Option<char>] = &[
    Some('D'),
    Some('D'),
    Some('T'),
    Some('S'),
    Some('P'),
    Some('R'),
    Some('C'),
    Some('F'),
    None,
];

fn rng_for(seed: u64, stream: Stream) -> StdRng {
    const MIX: u64 = 0x9e37_79b9_7f4a_7c15;
    StdRng::seed_from_u64(seed ^ (stream as u64).wrapping_mul(MIX))
}

/// Synthesizes order records and tracking from identifiers.
#[derive(Debug, Clone, Copy)]
pub struct MockStateEngine {
    anchor: DateTime<Utc>,
}

impl Default for MockStateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStateEngine {
    /// An engine anchored at the start of the current UTC day.
    #[must_use]
    pub fn new() -> Self {
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        Self::anchored_at(today)
    }

    /// An engine whose generated dates all lie before `anchor`.
    #[must_use]
    pub const fn anchored_at(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }

    /// The instant generated dates count back from.
    #[must_use]
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Build the full record for `order_id`.
    ///
    /// `customer_id` only matters when the identifier has no numeric part;
    /// otherwise the owner is derived from the number.
    #[must_use]
    pub fn build_record(&self, order_id: &str, customer_id: Option<&str>) -> OrderRecord {
        self.record_for(&OrderIdentifier::classify(order_id), customer_id)
    }

    /// Build the tracking for `order_id`, `None` when the order has not shipped.
    #[must_use]
    pub fn build_tracking(&self, order_id: &str) -> Option<TrackingInfo> {
        self.tracking_for(&OrderIdentifier::classify(order_id))
    }

    /// Build the full record for an already classified identifier.
    #[must_use]
    pub fn record_for(&self, id: &OrderIdentifier, customer_id: Option<&str>) -> OrderRecord {
        let created_at = self.placed_at(id);
        let items = line_items(id);
        let total = items
            .iter()
            .fold(Price::zero(CurrencyCode::USD), |acc, item| {
                acc + item.line_total()
            });
        let tracking = self.tracking_for(id);
        let updated_at = self.last_change(id, created_at, tracking.as_ref());
        let shipping_address = address(id);

        OrderRecord {
            order_id: id.as_str().to_owned(),
            customer_id: owner(id, customer_id),
            status: id.tag(),
            created_at,
            updated_at,
            items,
            total,
            billing_address: billing_address(id, &shipping_address),
            shipping_address,
            tracking,
        }
    }

    /// Build tracking for an already classified identifier.
    #[must_use]
    pub fn tracking_for(&self, id: &OrderIdentifier) -> Option<TrackingInfo> {
        let shape = id.tag().tracking_shape();
        if !shape.is_tracked() {
            return None;
        }

        let mut rng = rng_for(id.seed(), Stream::Tracking);
        let carrier = CARRIERS.choose(&mut rng)?;
        let tracking_number = tracking_number(carrier, &mut rng);
        let shipped_at = self.shipped_at(id);
        let destination = address(id);
        let destination = format!("{}, {}", destination.city, destination.region);

        let events = match shape {
            TrackingShape::None => return None,
            TrackingShape::CarrierOnly => Vec::new(),
            TrackingShape::WithEvents => transit_events(&mut rng, shipped_at),
            TrackingShape::Delivered => delivered_events(&mut rng, shipped_at, &destination),
        };

        let estimated_delivery = (shape != TrackingShape::Delivered)
            .then(|| shipped_at + TimeDelta::days(rng.random_range(3..=5)));

        Some(TrackingInfo {
            carrier: carrier.name.to_owned(),
            tracking_url: format!("{}{tracking_number}", carrier.tracking_url),
            tracking_number,
            status: id.tag(),
            estimated_delivery,
            last_location: events.last().map(|event| event.location.clone()),
            events,
        })
    }

    /// Recent orders owned by `customer_id`, newest first.
    ///
    /// Owners are derived from order numbers, so `CUST-1xx` owns every order
    /// whose number ends in `xx`; the history is a stable sample of two to six
    /// of them. Any other customer id owns no numbered orders.
    #[must_use]
    pub fn customer_orders(&self, customer_id: &str) -> Vec<OrderRecord> {
        let Some(slot) = customer_slot(customer_id) else {
            return Vec::new();
        };

        let mut rng = rng_for(slot, Stream::History);
        let count: u64 = rng.random_range(2..=6);
        let mut records: Vec<OrderRecord> = (0..count)
            .map(|index| {
                let number = 1000 + 100 * index + slot;
                let raw = match HISTORY_SUFFIXES.choose(&mut rng).copied().flatten() {
                    Some(suffix) => format!("ORD-{number}-{suffix}"),
                    None => format!("ORD-{number}"),
                };
                self.build_record(&raw, None)
            })
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// The record after a successful cancellation.
    #[must_use]
    pub fn cancelled(&self, mut record: OrderRecord) -> OrderRecord {
        record.status = BehaviorTag::Cancelled;
        record.tracking = None;
        record.updated_at = self.anchor;
        record
    }

    /// The record and return request after a successful return.
    ///
    /// `line_ids` must already be resolved against the record; an empty slice
    /// returns every line.
    #[must_use]
    pub fn returned(
        &self,
        mut record: OrderRecord,
        line_ids: &[String],
        reason: &str,
    ) -> (OrderRecord, ReturnDetails) {
        let selected: Vec<&LineItem> = if line_ids.is_empty() {
            record.items.iter().collect()
        } else {
            record
                .items
                .iter()
                .filter(|item| line_ids.contains(&item.line_id))
                .collect()
        };

        let refund_amount = selected
            .iter()
            .fold(Price::zero(record.total.currency_code), |acc, item| {
                acc + item.line_total()
            });
        let items = selected.iter().map(|item| item.line_id.clone()).collect();

        let id = OrderIdentifier::classify(&record.order_id);
        let mut rng = rng_for(id.seed(), Stream::Return);
        let return_id = ReturnId::new(format!("RET-{:04}", rng.random_range(0..10_000)));

        record.updated_at = self.anchor;
        let details = ReturnDetails {
            return_id,
            status: ReturnStatus::Initiated,
            reason: reason.to_owned(),
            items,
            refund_amount,
        };
        (record, details)
    }

    fn placed_at(&self, id: &OrderIdentifier) -> DateTime<Utc> {
        let mut rng = rng_for(id.seed(), Stream::Dates);
        let (min_days, max_days) = age_in_days(id.tag());
        let days = rng.random_range(min_days..=max_days);
        let hours = rng.random_range(1..=23);
        self.anchor - TimeDelta::days(days) - TimeDelta::hours(hours)
    }

    fn last_change(
        &self,
        id: &OrderIdentifier,
        created_at: DateTime<Utc>,
        tracking: Option<&TrackingInfo>,
    ) -> DateTime<Utc> {
        if let Some(event) = tracking.and_then(|t| t.events.last()) {
            return event.timestamp;
        }
        if id.tag() == BehaviorTag::Pending {
            return created_at;
        }
        let mut rng = rng_for(id.seed(), Stream::Dates);
        let mut changed = created_at + TimeDelta::hours(rng.random_range(1..=12));
        if tracking.is_some() {
            // Carrier-only tracking has no scans; the handover is the latest change.
            changed = changed.max(self.shipped_at(id));
        }
        changed.min(self.anchor)
    }

    /// When the carrier took the parcel. Only meaningful for tracked states.
    fn shipped_at(&self, id: &OrderIdentifier) -> DateTime<Utc> {
        let mut rng = rng_for(id.seed(), Stream::Shipment);
        self.placed_at(id) + TimeDelta::hours(rng.random_range(18..=36))
    }
}

/// How long ago an order in each state was placed, in days.
const fn age_in_days(tag: BehaviorTag) -> (i64, i64) {
    match tag {
        BehaviorTag::Pending | BehaviorTag::NotFound => (0, 1),
        BehaviorTag::Processing => (1, 2),
        BehaviorTag::ReadyForPickup | BehaviorTag::Shipped => (2, 4),
        BehaviorTag::InTransit => (4, 6),
        BehaviorTag::Delivered => (8, 21),
        BehaviorTag::Cancelled | BehaviorTag::Failed => (1, 10),
    }
}

fn owner(id: &OrderIdentifier, customer_id: Option<&str>) -> CustomerId {
    match id.numeric_id() {
        Some(number) => CustomerId::new(format!("CUST-{}", 100 + number % 100)),
        None => CustomerId::new(customer_id.unwrap_or(GUEST_CUSTOMER)),
    }
}

fn line_items(id: &OrderIdentifier) -> Vec<LineItem> {
    let mut rng = rng_for(id.seed(), Stream::Items);
    let count = rng.random_range(1..=3);
    let products: Vec<_> = PRODUCTS.choose_multiple(&mut rng, count).collect();

    products
        .into_iter()
        .enumerate()
        .map(|(index, product)| LineItem {
            line_id: format!("{}-L{}", id.as_str(), index + 1),
            sku: product.sku.to_owned(),
            name: product.name.to_owned(),
            quantity: rng.random_range(1..=3),
            unit_price: Price::from_cents(product.price_cents, CurrencyCode::USD),
        })
        .collect()
}

fn address(id: &OrderIdentifier) -> Address {
    random_address(&mut rng_for(id.seed(), Stream::Address))
}

/// Most customers bill to the delivery address.
fn billing_address(id: &OrderIdentifier, shipping: &Address) -> Address {
    let mut rng = rng_for(id.seed(), Stream::Billing);
    if rng.random_bool(0.7) {
        shipping.clone()
    } else {
        random_address(&mut rng)
    }
}

fn random_address(rng: &mut StdRng) -> Address {
    let (city, region, postcode) = CITIES.choose(rng).copied().unwrap_or(CITIES_FALLBACK);
    let street = STREETS.choose(rng).copied().unwrap_or("Main Street");
    let number: u32 = rng.random_range(10..=9_999);

    Address {
        line_1: format!("{number} {street}"),
        city: city.to_owned(),
        region: region.to_owned(),
        postcode: postcode.to_owned(),
        country: "US".to_owned(),
    }
}

/// `CUST-100` to `CUST-199` map to slots `0..100`.
fn customer_slot(customer_id: &str) -> Option<u64> {
    let customer_id = customer_id.trim();
    let number: u64 = customer_id.strip_prefix("CUST-")?.parse().ok()?;
    let canonical = customer_id == format!("CUST-{number}");
    (canonical && (100..200).contains(&number)).then(|| number - 100)
}

const CITIES_FALLBACK: (&str, &str, &str) = ("Reno", "NV", "89501");

fn tracking_number(carrier: &Carrier, rng: &mut StdRng) -> String {
    let digits: String = (0..carrier.number_digits)
        .map(|_| char::from(b'0' + rng.random_range(0..10_u8)))
        .collect();
    format!("{}{digits}", carrier.number_prefix)
}

fn hub(rng: &mut StdRng) -> String {
    HUBS.choose(rng).copied().unwrap_or(WAREHOUSE).to_owned()
}

fn event(timestamp: DateTime<Utc>, location: impl Into<String>, description: &str) -> TrackingEvent {
    TrackingEvent {
        timestamp,
        location: location.into(),
        description: description.to_owned(),
    }
}

/// One to three scans: pickup, then hub arrivals.
fn transit_events(rng: &mut StdRng, shipped_at: DateTime<Utc>) -> Vec<TrackingEvent> {
    let count = rng.random_range(1..=3);
    let mut at = shipped_at;
    let mut events = vec![event(at, WAREHOUSE, "Picked up by carrier")];

    for index in 1..count {
        at += TimeDelta::hours(rng.random_range(6..=12));
        let description = if index % 2 == 1 {
            "Arrived at carrier facility"
        } else {
            "Departed carrier facility"
        };
        events.push(event(at, hub(rng), description));
    }
    events
}

/// Pickup, hub scans, out for delivery, delivered.
fn delivered_events(
    rng: &mut StdRng,
    shipped_at: DateTime<Utc>,
    destination: &str,
) -> Vec<TrackingEvent> {
    let mut at = shipped_at;
    let mut events = vec![event(at, WAREHOUSE, "Picked up by carrier")];

    for _ in 0..rng.random_range(1..=2) {
        at += TimeDelta::hours(rng.random_range(8..=20));
        events.push(event(at, hub(rng), "Arrived at carrier facility"));
    }

    at += TimeDelta::hours(rng.random_range(8..=20));
    events.push(event(at, destination, "Out for delivery"));
    at += TimeDelta::hours(rng.random_range(2..=8));
    events.push(event(at, destination, "Delivered"));
    events
}
