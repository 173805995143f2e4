//! Field normalization for loosely-typed order input
//!
//! Phone numbers and dates arrive as whatever the client sent. These helpers
//! turn them into the canonical stored form, or report them absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Primary date format (ISO 8601 calendar date)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fallback date format accepted from clients
pub const SECONDARY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A phone number stored as its digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(i64);

impl PhoneNumber {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for PhoneNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a phone value
///
/// Accepts a JSON string or number. Hyphens and spaces are stripped and the
/// rest parsed as an integer. Null, empty, unparsable or otherwise-typed input
/// yields `None`; this function never fails.
pub fn normalize_phone(raw: &Value) -> Option<PhoneNumber> {
    let text = match raw {
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let cleaned: String = text.chars().filter(|c| *c != '-' && *c != ' ').collect();
    cleaned.parse::<i64>().ok().map(PhoneNumber)
}

/// Normalize a date value
///
/// Strings are tried as an ISO date, then an ISO date-time (keeping the date
/// part), then `DD/MM/YYYY`. Anything else is `None`.
pub fn normalize_date(raw: &Value) -> Option<NaiveDate> {
    raw.as_str().and_then(parse_date)
}

/// Parse a date string using the accepted formats in order
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, ISO_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(text, SECONDARY_DATE_FORMAT).ok()
}
