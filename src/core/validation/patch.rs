//! Typed partial update of an order

use crate::core::field::PhoneNumber;
use crate::core::order::{Order, OrderStatus};
use chrono::NaiveDate;

/// The validated subset of an update payload
///
/// Outer `None` means "leave as is". For phones, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<Option<PhoneNumber>>,
    pub receiver_name: Option<String>,
    pub receiver_phone: Option<Option<PhoneNumber>>,
    pub product_name: Option<String>,
    pub address: Option<String>,
    pub observations: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set field into `order` and bump its timestamp
    pub fn apply_to(self, order: &mut Order) {
        if self.is_empty() {
            return;
        }

        if let Some(date) = self.date {
            order.date = date;
        }
        if let Some(customer_name) = self.customer_name {
            order.customer_name = customer_name;
        }
        if let Some(customer_phone) = self.customer_phone {
            order.customer_phone = customer_phone;
        }
        if let Some(receiver_name) = self.receiver_name {
            order.receiver_name = receiver_name;
        }
        if let Some(receiver_phone) = self.receiver_phone {
            order.receiver_phone = receiver_phone;
        }
        if let Some(product_name) = self.product_name {
            order.product_name = product_name;
        }
        if let Some(address) = self.address {
            order.address = address;
        }
        if let Some(observations) = self.observations {
            order.observations = observations;
        }
        if let Some(status) = self.status {
            order.status = status;
        }

        order.touch();
    }
}
