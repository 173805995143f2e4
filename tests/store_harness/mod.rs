//! Shared test harness for order store testing
//!
//! Provides builders for `NewOrder` values and JSON payloads, plus the
//! `order_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod order_store_tests;

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use order_tracker::core::field::PhoneNumber;
use order_tracker::core::order::{NewOrder, OrderStatus};

/// A pending order with every text field filled in
pub fn new_order(receiver_name: &str, customer_name: &str, date: NaiveDate) -> NewOrder {
    NewOrder {
        date,
        customer_name: customer_name.to_string(),
        customer_phone: Some(PhoneNumber::from(5550100)),
        receiver_name: receiver_name.to_string(),
        receiver_phone: Some(PhoneNumber::from(123456)),
        product_name: "Desk".to_string(),
        address: "12 Main St".to_string(),
        observations: String::new(),
        status: OrderStatus::Pending,
    }
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// JSON payload accepted by the default validator
pub fn valid_payload() -> Value {
    json!({
        "date": "2024-03-15",
        "customer_name": "Acme",
        "customer_phone": "555-0100",
        "receiver_name": "Bob",
        "receiver_phone": "12-34 56",
        "product_name": "Chair",
        "address": "1 Road"
    })
}

/// `valid_payload` with some keys replaced or added
pub fn payload_with(overrides: Value) -> Map<String, Value> {
    let mut payload = as_map(valid_payload());
    if let Value::Object(extra) = overrides {
        payload.extend(extra);
    }
    payload
}

pub fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
