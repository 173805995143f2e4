//! Order validation rules for create and update payloads

use super::patch::OrderPatch;
use super::validators::{
    filter_allowed_update_fields, is_blank, validate_create, validate_status_transition,
};
use crate::core::error::{OrderError, Result, ValidationError};
use crate::core::field::{normalize_date, normalize_phone};
use crate::core::order::{NewOrder, Order, OrderStatus, PAYLOAD_FIELDS, fields};
use chrono::Utc;
use serde_json::{Map, Value};

/// Fields required at creation unless configured otherwise
pub const DEFAULT_REQUIRED_FIELDS: &[&str] = &[
    fields::RECEIVER_NAME,
    fields::ADDRESS,
    fields::RECEIVER_PHONE,
    fields::CUSTOMER_NAME,
];

const DATE_HINT: &str = "expected YYYY-MM-DD, an ISO date-time or DD/MM/YYYY";

/// Turns raw payloads into validated orders and patches
///
/// The required-field list is fixed per instance and checked in order.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    required_fields: Vec<String>,
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect())
    }
}

impl OrderValidator {
    pub fn new(required_fields: Vec<String>) -> Self {
        Self { required_fields }
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    fn is_required(&self, field: &str) -> bool {
        self.required_fields.iter().any(|f| f == field)
    }

    /// Validate a create payload and normalize it into a [`NewOrder`]
    ///
    /// Required fields are checked on the raw payload, so a present but
    /// unparsable phone passes and is stored as absent. An absent date
    /// defaults to today (UTC).
    pub fn new_order(&self, payload: &Map<String, Value>) -> Result<NewOrder> {
        validate_create(payload, self.required_fields.as_slice())?;

        let date = match payload.get(fields::DATE) {
            None => Utc::now().date_naive(),
            Some(value) if is_blank(value) => {
                return Err(ValidationError::empty(fields::DATE).into());
            }
            Some(value) => {
                normalize_date(value).ok_or_else(|| ValidationError::invalid(fields::DATE, DATE_HINT))?
            }
        };

        let status = match payload.get(fields::STATUS) {
            None | Some(Value::Null) => OrderStatus::default(),
            Some(value) => parse_status(value)?,
        };
        validate_status_transition(false, status)?;

        Ok(NewOrder {
            date,
            customer_name: text_or_default(payload, fields::CUSTOMER_NAME)?,
            customer_phone: payload.get(fields::CUSTOMER_PHONE).and_then(normalize_phone),
            receiver_name: text_or_default(payload, fields::RECEIVER_NAME)?,
            receiver_phone: payload.get(fields::RECEIVER_PHONE).and_then(normalize_phone),
            product_name: text_or_default(payload, fields::PRODUCT_NAME)?,
            address: text_or_default(payload, fields::ADDRESS)?,
            observations: text_or_default(payload, fields::OBSERVATIONS)?,
            status,
        })
    }

    /// Validate an update payload against the current order
    ///
    /// Everything is checked before the patch is returned, so no mutation can
    /// happen on a rejected request. The DELIVERED rule looks at `current`,
    /// i.e. the signature state before this update.
    pub fn patch(&self, current: &Order, payload: &Map<String, Value>) -> Result<OrderPatch> {
        let payload = filter_allowed_update_fields(payload, PAYLOAD_FIELDS);
        let mut patch = OrderPatch::default();

        if let Some(value) = payload.get(fields::STATUS) {
            let status = parse_status(value)?;
            validate_status_transition(current.has_signature(), status).map_err(|_| {
                OrderError::SignatureRequired {
                    id: Some(current.id),
                }
            })?;
            patch.status = Some(status);
        }

        for (field, value) in &payload {
            if is_blank(value) && (self.is_required(field) || field == fields::DATE) {
                return Err(ValidationError::empty(field).into());
            }
        }

        if let Some(value) = payload.get(fields::DATE) {
            patch.date = Some(
                normalize_date(value).ok_or_else(|| ValidationError::invalid(fields::DATE, DATE_HINT))?,
            );
        }

        patch.customer_name = optional_text(&payload, fields::CUSTOMER_NAME)?;
        patch.receiver_name = optional_text(&payload, fields::RECEIVER_NAME)?;
        patch.product_name = optional_text(&payload, fields::PRODUCT_NAME)?;
        patch.address = optional_text(&payload, fields::ADDRESS)?;
        patch.observations = optional_text(&payload, fields::OBSERVATIONS)?;
        patch.customer_phone = payload.get(fields::CUSTOMER_PHONE).map(normalize_phone);
        patch.receiver_phone = payload.get(fields::RECEIVER_PHONE).map(normalize_phone);

        Ok(patch)
    }
}

fn parse_status(value: &Value) -> Result<OrderStatus, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::invalid(fields::STATUS, "expected a string"))?
        .parse()
}

fn as_text(field: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::invalid(field, "expected a string")),
    }
}

fn text_or_default(payload: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    payload
        .get(field)
        .map(|value| as_text(field, value))
        .transpose()
        .map(Option::unwrap_or_default)
}

fn optional_text(
    payload: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, ValidationError> {
    payload.get(field).map(|value| as_text(field, value)).transpose()
}
