//! Reusable order validators
//!
//! Each check is a plain function over the raw JSON payload so it can run
//! before anything is converted or stored.

use crate::core::error::{OrderError, ValidationError};
use crate::core::order::OrderStatus;
use serde_json::{Map, Value};

/// A value counts as empty when it is null or the empty string
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Check every required field is present and non-empty
///
/// Fields are checked in the order given; the first failure wins, reported as
/// `MissingField` when the key is absent and `EmptyField` when it is null or
/// an empty string.
pub fn validate_create<S: AsRef<str>>(
    payload: &Map<String, Value>,
    required: &[S],
) -> Result<(), ValidationError> {
    for field in required {
        let field = field.as_ref();
        match payload.get(field) {
            None => return Err(ValidationError::missing(field)),
            Some(value) if is_blank(value) => return Err(ValidationError::empty(field)),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Reject DELIVERED unless a signature is already attached
///
/// `signature_present` must describe the order before the current request is
/// applied.
pub fn validate_status_transition(
    signature_present: bool,
    requested: OrderStatus,
) -> Result<(), OrderError> {
    if requested == OrderStatus::Delivered && !signature_present {
        return Err(OrderError::SignatureRequired { id: None });
    }
    Ok(())
}

/// Keep only the allow-listed keys of an update payload
///
/// Unknown keys are dropped without error.
pub fn filter_allowed_update_fields(
    payload: &Map<String, Value>,
    allow_list: &[&str],
) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(key, _)| allow_list.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
