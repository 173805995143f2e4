//! HTTP handlers for order operations
//!
//! Handlers only translate between HTTP and [`OrderService`]; every rule
//! lives in the service and its validator.

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{RequestError, Result, TrackerError};
use crate::core::order::OrderId;
use crate::core::query::SearchParams;
use crate::core::service::OrderService;
use crate::core::store::SignatureUpload;
use crate::core::validation::OrderPayload;

/// Multipart field carrying the signature image
pub const SIGNATURE_FIELD: &str = "signature";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrderService>,
}

impl AppState {
    pub fn new(service: OrderService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

fn parse_order_id(raw: &str) -> Result<OrderId> {
    Uuid::parse_str(raw).map_err(|_| {
        RequestError::InvalidOrderId {
            value: raw.to_string(),
        }
        .into()
    })
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    payload: OrderPayload,
) -> Result<impl IntoResponse> {
    let id = state.service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "order_id": id }))))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_order_id(&id)?;
    let order = state.service.get(&id).await?;
    Ok(Json(json!({ "order": order })))
}

/// PATCH or PUT /orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: OrderPayload,
) -> Result<Json<Value>> {
    let id = parse_order_id(&id)?;
    let order = state.service.update(&id, &payload).await?;
    Ok(Json(json!({ "order": order })))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_order_id(&id)?;
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /orders/{id}/signature
///
/// Reads the multipart field named `signature`; other fields are skipped.
/// A request that is not multipart at all is treated as carrying no file.
/// The order is looked up before the body is read.
pub async fn upload_signature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>> {
    let id = parse_order_id(&id)?;
    state.service.get(&id).await?;

    let upload = match multipart {
        Ok(multipart) => read_signature_field(multipart).await?,
        Err(rejection) => {
            tracing::debug!(order_id = %id, reason = %rejection.body_text(), "signature request is not multipart");
            None
        }
    };

    let order = state.service.attach_signature(&id, upload).await?;
    Ok(Json(json!({
        "message": "Signature uploaded successfully",
        "order": order
    })))
}

async fn read_signature_field(mut multipart: Multipart) -> Result<Option<SignatureUpload>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(SIGNATURE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let mut upload = SignatureUpload::new(bytes.to_vec());
        if let Some(name) = file_name {
            upload = upload.with_file_name(name);
        }
        if let Some(content_type) = content_type {
            upload = upload.with_content_type(content_type);
        }
        return Ok(Some(upload));
    }
    Ok(None)
}

fn multipart_error(err: MultipartError) -> TrackerError {
    let message = err.body_text();
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RequestError::PayloadTooLarge { message }.into()
    } else {
        RequestError::InvalidPayload { message }.into()
    }
}

/// GET /orders/search
pub async fn search_orders(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let orders = state.service.search(&SearchParams::new(params)).await?;
    Ok(Json(json!({ "orders": orders })))
}

/// GET /health and /healthz
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "order-tracker"
    }))
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> TrackerError {
    RequestError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}
