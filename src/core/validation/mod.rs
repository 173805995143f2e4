//! Validation and normalization of order payloads
//!
//! Free-standing checks live in [`validators`]; [`OrderValidator`] combines
//! them with the field normalizers into create and update rules.

pub mod extractor;
pub mod patch;
pub mod rules;
pub mod validators;

pub use extractor::OrderPayload;
pub use patch::OrderPatch;
pub use rules::{DEFAULT_REQUIRED_FIELDS, OrderValidator};
pub use validators::{filter_allowed_update_fields, validate_create, validate_status_transition};
