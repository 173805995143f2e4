//! Typed error handling for the order tracker
//!
//! Every failure the service can report is a variant of [`TrackerError`],
//! grouped by category so callers can match on exactly what went wrong
//! instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: rejected order fields and search parameters
//! - [`OrderError`]: order lookups and the delivery/signature rule
//! - [`RequestError`]: malformed HTTP input (body, path, file, method)
//! - [`StorageError`]: failures reported by the record or signature store
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match service.update(&id, &payload).await {
//!     Ok(order) => println!("updated {}", order.id),
//!     Err(TrackerError::Order(OrderError::SignatureRequired { .. })) => {
//!         println!("upload a signature first");
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Result alias used throughout the crate
pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

/// The main error type for the order tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Field or query validation failures
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Order lookup and lifecycle failures
    #[error(transparent)]
    Order(#[from] OrderError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TrackerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackerError::Validation(_) => StatusCode::BAD_REQUEST,
            TrackerError::Order(e) => e.status_code(),
            TrackerError::Request(e) => e.status_code(),
            TrackerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrackerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TrackerError::Validation(e) => e.error_code(),
            TrackerError::Order(e) => e.error_code(),
            TrackerError::Request(e) => e.error_code(),
            TrackerError::Storage(_) => "STORAGE_ERROR",
            TrackerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TrackerError::Validation(
                ValidationError::MissingField { field }
                | ValidationError::EmptyField { field }
                | ValidationError::InvalidField { field, .. },
            ) => Some(serde_json::json!({ "field": field })),
            TrackerError::Validation(ValidationError::InvalidDateFormat { value }) => {
                Some(serde_json::json!({ "value": value, "expected": "DD-MM" }))
            }
            TrackerError::Order(OrderError::NotFound { id })
            | TrackerError::Order(OrderError::SignatureRequired { id: Some(id) }) => {
                Some(serde_json::json!({ "order_id": id.to_string() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to order fields and search parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent from the payload
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A required field is present but null or an empty string
    #[error("Required field {field} cannot be empty")]
    EmptyField { field: String },

    /// A field carries a value that cannot be stored
    #[error("Invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The `date` search parameter is not `DD-MM`
    #[error("Invalid date format '{value}', use DD-MM")]
    InvalidDateFormat { value: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::EmptyField { .. } => "EMPTY_FIELD",
            ValidationError::InvalidField { .. } => "INVALID_FIELD",
            ValidationError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn empty(field: &str) -> Self {
        ValidationError::EmptyField {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Order Errors
// =============================================================================

/// Errors related to order lookups and lifecycle rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// No order with this id exists
    #[error("order with id '{id}' not found")]
    NotFound { id: Uuid },

    /// DELIVERED requested while no signature is attached
    #[error("Signature is required to mark order as delivered.")]
    SignatureRequired { id: Option<Uuid> },
}

impl OrderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
            OrderError::SignatureRequired { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::NotFound { .. } => "ORDER_NOT_FOUND",
            OrderError::SignatureRequired { .. } => "SIGNATURE_REQUIRED",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Body is malformed: not a JSON object, or unreadable multipart
    #[error("Invalid request body: {message}")]
    InvalidPayload { message: String },

    /// Body exceeds the configured upload limit
    #[error("Request body is too large: {message}")]
    PayloadTooLarge { message: String },

    /// Path segment is not an order id
    #[error("Invalid order id format: '{value}'")]
    InvalidOrderId { value: String },

    /// Signature upload carried no file
    #[error("No signature file provided")]
    NoFileProvided,

    /// Known path, unsupported method
    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            RequestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::InvalidOrderId { .. } => StatusCode::BAD_REQUEST,
            RequestError::NoFileProvided => StatusCode::BAD_REQUEST,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            RequestError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            RequestError::InvalidOrderId { .. } => "INVALID_ORDER_ID",
            RequestError::NoFileProvided => "NO_FILE_PROVIDED",
            RequestError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors reported by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// The order record store failed
    #[error("Order store failed during {operation}: {message}")]
    RecordStore { operation: String, message: String },

    /// The signature store failed
    #[error("Signature store failed: {message}")]
    SignatureStore { message: String },
}

impl StorageError {
    pub(crate) fn record(operation: &str, err: anyhow::Error) -> Self {
        StorageError::RecordStore {
            operation: operation.to_string(),
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn signature(err: anyhow::Error) -> Self {
        StorageError::SignatureStore {
            message: format!("{err:#}"),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file could not be read
    #[error("Config file '{path}' could not be read: {message}")]
    FileNotFound { path: String, message: String },

    /// Parsed configuration holds an unusable value
    #[error("Invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
