//! Route table for the order API

use super::handlers::{
    AppState, create_order, delete_order, get_order, health, method_not_allowed, search_orders,
    update_order, upload_signature,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}

/// Build order routes
///
/// - POST /orders - Create an order
/// - GET /orders/search - Search orders by query parameters
/// - GET /orders/{id} - Fetch one order
/// - PATCH|PUT /orders/{id} - Partial update
/// - DELETE /orders/{id} - Delete an order
/// - PATCH /orders/{id}/signature - Upload a signature image (multipart)
pub fn order_routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/search", get(search_orders))
        .route(
            "/orders/{id}",
            get(get_order)
                .patch(update_order)
                .put(update_order)
                .delete(delete_order),
        )
        .route(
            "/orders/{id}/signature",
            patch(upload_signature).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}
