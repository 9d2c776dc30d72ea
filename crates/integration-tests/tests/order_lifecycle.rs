//! Order tools driven end to end through the tool executor.
//!
//! The suffix letter on an order id decides how the mock platform behaves;
//! these tests pin that behaviour for each lifecycle state.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use parcel_desk_integration_tests::{anchored_handler, call_tool};
use serde_json::{Value, json};

/// Order numbers every lifecycle property is checked against.
const NUMBERS: std::ops::Range<u32> = 1000..1040;

async fn order(order_id: &str) -> Value {
    let handler = anchored_handler();
    let result = call_tool(&handler, "get_order_status", json!({ "order_id": order_id }))
        .await
        .unwrap();
    assert!(!result.is_error(), "{order_id} should resolve");
    result.into_value()
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn test_delivered_orders_end_with_delivery_scan() {
    for n in NUMBERS {
        let record = order(&format!("ORD-{n}-D")).await;
        assert_eq!(record["status"], "delivered", "{n}");

        let events = record["tracking"]["events"].as_array().unwrap();
        assert!(!events.is_empty(), "{n}");
        assert_eq!(events.last().unwrap()["description"], "Delivered", "{n}");
    }
}

#[tokio::test]
async fn test_shipped_orders_have_carrier_but_no_scans() {
    for n in NUMBERS {
        let record = order(&format!("ORD-{n}-S")).await;
        assert_eq!(record["status"], "shipped", "{n}");

        let tracking = &record["tracking"];
        assert!(tracking["carrier"].as_str().is_some_and(|c| !c.is_empty()), "{n}");
        assert!(
            tracking["tracking_number"].as_str().is_some_and(|t| !t.is_empty()),
            "{n}"
        );
        assert_eq!(tracking["events"].as_array().map(Vec::len), Some(0), "{n}");
    }
}

#[tokio::test]
async fn test_in_transit_orders_have_scans() {
    for n in NUMBERS {
        let record = order(&format!("ORD-{n}-T")).await;
        assert_eq!(record["status"], "in_transit", "{n}");
        assert!(
            record["tracking"]["events"].as_array().is_some_and(|e| !e.is_empty()),
            "{n}"
        );
    }
}

#[tokio::test]
async fn test_processing_order_is_not_tracked() {
    let record = order("ORD-1004-P").await;
    assert_eq!(record["status"], "processing");
    assert!(record.get("tracking").is_none_or(Value::is_null));

    let handler = anchored_handler();
    let result = call_tool(&handler, "track_package", json!({ "order_id": "ORD-1004-P" }))
        .await
        .unwrap();
    assert!(result.is_error());
    assert_eq!(result.value()["error_code"], "not_tracked");
}

#[tokio::test]
async fn test_only_suffix_e_is_not_found() {
    let handler = anchored_handler();
    for n in NUMBERS {
        for suffix in ["", "-D", "-S", "-T", "-P", "-R", "-C", "-F"] {
            let order_id = format!("ORD-{n}{suffix}");
            let result = call_tool(&handler, "get_order_status", json!({ "order_id": order_id }))
                .await
                .unwrap();
            assert!(!result.is_error(), "{order_id} should resolve");
        }

        let order_id = format!("ORD-{n}-E");
        let result = call_tool(&handler, "get_order_status", json!({ "order_id": order_id }))
            .await
            .unwrap();
        assert!(result.is_error(), "{order_id}");
        assert_eq!(result.value()["error_code"], "order_not_found", "{order_id}");
    }

    let result = call_tool(&handler, "get_order_status", json!({ "order_id": "12345" }))
        .await
        .unwrap();
    assert!(!result.is_error());
}

#[tokio::test]
async fn test_lookups_are_repeatable() {
    let first = order("ORD-1003-T").await;
    let second = order("ORD-1003-T").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_numeric_part_changes_details() {
    let one = order("ORD-1001-D").await;
    let two = order("ORD-2002-D").await;
    assert_eq!(one["status"], two["status"]);
    assert_ne!(
        one["tracking"]["tracking_number"],
        two["tracking"]["tracking_number"]
    );
}

// =============================================================================
// Actions
// =============================================================================

#[tokio::test]
async fn test_cancel_processing_order() {
    let handler = anchored_handler();
    let result = call_tool(
        &handler,
        "cancel_order",
        json!({ "order_id": "ORD-1004-P", "reason": "Ordered twice" }),
    )
    .await
    .unwrap();

    assert!(!result.is_error());
    let action = result.value();
    assert_eq!(action["success"], true);
    assert_eq!(action["order_id"], "ORD-1004-P");
    assert_eq!(action["new_status"], "cancelled");
}

#[tokio::test]
async fn test_cancel_refused_for_terminal_orders() {
    let handler = anchored_handler();
    for n in NUMBERS {
        for suffix in ["C", "F", "D"] {
            let order_id = format!("ORD-{n}-{suffix}");
            let result = call_tool(&handler, "cancel_order", json!({ "order_id": order_id }))
                .await
                .unwrap();
            assert!(result.is_error(), "{order_id} should not cancel");
            assert_eq!(result.value()["success"], false);
            assert_eq!(result.value()["error_code"], "not_cancellable", "{order_id}");
        }
    }
}

#[tokio::test]
async fn test_return_delivered_order() {
    let handler = anchored_handler();
    let result = call_tool(
        &handler,
        "process_return",
        json!({ "order_id": "ORD-1001-D", "reason": "Wrong colour" }),
    )
    .await
    .unwrap();

    assert!(!result.is_error());
    let action = result.value();
    assert_eq!(action["success"], true);
    assert_eq!(action["return_details"]["reason"], "Wrong colour");
    assert_eq!(action["return_details"]["status"], "initiated");
}

#[tokio::test]
async fn test_every_delivered_order_can_be_returned() {
    let handler = anchored_handler();
    for n in NUMBERS {
        let order_id = format!("ORD-{n}-D");
        let result = call_tool(&handler, "process_return", json!({ "order_id": order_id }))
            .await
            .unwrap();
        assert!(!result.is_error(), "{order_id}");
        assert_eq!(result.value()["success"], true, "{order_id}");
    }
}

#[tokio::test]
async fn test_return_refused_before_delivery() {
    let handler = anchored_handler();
    let result = call_tool(&handler, "process_return", json!({ "order_id": "ORD-1002-S" }))
        .await
        .unwrap();
    assert!(result.is_error());
    assert_eq!(result.value()["error_code"], "not_returnable");
}

#[tokio::test]
async fn test_actions_on_missing_order() {
    let handler = anchored_handler();
    for tool in ["cancel_order", "process_return", "track_package"] {
        let result = call_tool(&handler, tool, json!({ "order_id": "ORD-9999-E" }))
            .await
            .unwrap();
        assert!(result.is_error(), "{tool}");
        assert_eq!(result.value()["error_code"], "order_not_found", "{tool}");
    }
}

#[tokio::test]
async fn test_blank_order_id_is_invalid() {
    let handler = anchored_handler();
    for tool in ["get_order_status", "cancel_order", "process_return", "track_package"] {
        let result = call_tool(&handler, tool, json!({ "order_id": "   " }))
            .await
            .unwrap();
        assert!(result.is_error(), "{tool}");
        assert_eq!(result.value()["error_code"], "invalid_argument", "{tool}");
    }
}

// =============================================================================
// Customer history
// =============================================================================

#[tokio::test]
async fn test_customer_history_lists_owned_orders() {
    let handler = anchored_handler();
    let result = call_tool(
        &handler,
        "get_customer_orders",
        json!({ "customer_id": "CUST-103" }),
    )
    .await
    .unwrap();
    assert!(!result.is_error());

    let orders = result.value()["orders"].as_array().unwrap().clone();
    assert!(!orders.is_empty());
    for summary in &orders {
        let order_id = summary["order_id"].as_str().unwrap();
        let result = call_tool(
            &handler,
            "get_order_status",
            json!({ "order_id": order_id, "customer_id": "CUST-103" }),
        )
        .await
        .unwrap();
        assert!(!result.is_error(), "{order_id}");
        assert_eq!(result.value()["status"], summary["status"], "{order_id}");
        assert_eq!(result.value()["total"], summary["total"], "{order_id}");
    }
}

#[tokio::test]
async fn test_customer_history_filters_by_status() {
    let handler = anchored_handler();
    let result = call_tool(
        &handler,
        "get_customer_orders",
        json!({ "customer_id": "CUST-150", "status": "delivered", "limit": 20 }),
    )
    .await
    .unwrap();
    assert!(!result.is_error());
    let orders = result.value()["orders"].as_array().unwrap().clone();
    assert!(orders.iter().all(|o| o["status"] == "delivered"));
}
