//! `pd-cli classify`.

use parcel_desk_core::OrderIdentifier;
use serde_json::{Value, json};

use super::{Outcome, print_json};

/// Print the classification of an order id.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn show(order_id: &str) -> Result<Outcome, Box<dyn std::error::Error>> {
    print_json(&describe(order_id))?;
    Ok(Outcome::Success)
}

fn describe(order_id: &str) -> Value {
    let id = OrderIdentifier::classify(order_id);
    let profile = id.tag().profile();
    json!({
        "order_id": id.as_str(),
        "numeric_id": id.numeric_id(),
        "suffix": id.suffix().map(String::from),
        "seed": id.seed(),
        "status": id.tag(),
        "label": profile.label,
        "tracking": profile.tracking,
        "terminal": profile.terminal,
        "cancellable": profile.cancellable,
        "returnable": profile.returnable,
    })
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_delivered() {
        let info = describe("ORD-1001-D");
        assert_eq!(info["numeric_id"], 1001);
        assert_eq!(info["suffix"], "D");
        assert_eq!(info["status"], "delivered");
        assert_eq!(info["returnable"], true);
        assert_eq!(info["cancellable"], false);
    }

    #[test]
    fn test_describe_unrecognised_id() {
        let info = describe("INVALID-ID");
        assert_eq!(info["numeric_id"], Value::Null);
        assert_eq!(info["status"], "pending");
    }
}
