//! HTTP server exposing the order service
//!
//! `ServerBuilder` wires stores and configuration into an [`OrderService`]
//! and registers health and order routes.
//!
//! [`OrderService`]: crate::core::service::OrderService

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
