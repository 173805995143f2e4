//! The order record and its status lifecycle

use crate::core::error::ValidationError;
use crate::core::field::PhoneNumber;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier assigned to an order by the record store
pub type OrderId = Uuid;

/// Wire names of the order fields
pub mod fields {
    pub const ID: &str = "id";
    pub const DATE: &str = "date";
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const CUSTOMER_PHONE: &str = "customer_phone";
    pub const RECEIVER_NAME: &str = "receiver_name";
    pub const RECEIVER_PHONE: &str = "receiver_phone";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const ADDRESS: &str = "address";
    pub const OBSERVATIONS: &str = "observations";
    pub const SIGNATURE: &str = "signature";
    pub const STATUS: &str = "status";
}

/// Fields a client may supply when creating or updating an order
pub const PAYLOAD_FIELDS: &[&str] = &[
    fields::DATE,
    fields::CUSTOMER_NAME,
    fields::CUSTOMER_PHONE,
    fields::RECEIVER_NAME,
    fields::RECEIVER_PHONE,
    fields::PRODUCT_NAME,
    fields::ADDRESS,
    fields::OBSERVATIONS,
    fields::STATUS,
];

/// Delivery state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Problematic,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Delivered,
        OrderStatus::Problematic,
    ];

    /// Lowercase wire form, as stored and matched by search
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Problematic => "problematic",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid(
                    fields::STATUS,
                    format!(
                        "'{}' is not one of pending, processing, delivered, problematic",
                        s
                    ),
                )
            })
    }
}

/// A delivery order as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<PhoneNumber>,
    pub receiver_name: String,
    pub receiver_phone: Option<PhoneNumber>,
    pub product_name: String,
    pub address: String,
    #[serde(default)]
    pub observations: String,
    pub signature: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    /// Bump `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A validated order that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<PhoneNumber>,
    pub receiver_name: String,
    pub receiver_phone: Option<PhoneNumber>,
    pub product_name: String,
    pub address: String,
    pub observations: String,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Materialize the record under the id chosen by the store
    pub fn into_order(self, id: OrderId) -> Order {
        let now = Utc::now();
        Order {
            id,
            date: self.date,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            receiver_name: self.receiver_name,
            receiver_phone: self.receiver_phone,
            product_name: self.product_name,
            address: self.address,
            observations: self.observations,
            signature: None,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}
