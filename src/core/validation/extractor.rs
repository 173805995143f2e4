//! Axum extractor for order payloads
//!
//! Reads the request body as a JSON object regardless of content type. An
//! empty body reads as `{}`; anything that is not a JSON object is rejected
//! with `INVALID_PAYLOAD` before the handler runs.

use crate::core::error::{RequestError, TrackerError};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

/// A request body parsed as a JSON object
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(
///     State(state): State<AppState>,
///     OrderPayload(payload): OrderPayload,
/// ) -> Result<impl IntoResponse, TrackerError> {
///     let id = state.service.create(&payload).await?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OrderPayload(pub Map<String, Value>);

impl OrderPayload {
    /// Parse raw body bytes
    pub fn from_bytes(body: &[u8]) -> Result<Self, RequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Map::new()));
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(RequestError::InvalidPayload {
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
            Err(e) => Err(RequestError::InvalidPayload {
                message: e.to_string(),
            }),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl std::ops::Deref for OrderPayload {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for OrderPayload
where
    S: Send + Sync,
{
    type Rejection = TrackerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidPayload {
                message: e.body_text(),
            })?;

        let payload = Self::from_bytes(&body).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected order payload");
        })?;
        Ok(payload)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
