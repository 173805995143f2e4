//! # Order Tracker
//!
//! Backend for tracking delivery orders over a JSON HTTP API.
//!
//! ## Features
//!
//! - **Lenient normalization**: phone numbers and dates accept several input shapes
//! - **Strict creation**: configurable required fields, checked in a fixed order
//! - **Partial updates**: allow-listed fields, validated before anything changes
//! - **Delivery guard**: an order cannot become `delivered` without a signature
//! - **Search**: status, receiver, customer, id and day-month filters combined with AND
//! - **Pluggable storage**: `OrderStore` and `SignatureStore` traits with in-memory
//!   and filesystem implementations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_tracker::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(TrackerConfig::from_yaml_file("config/tracker.yaml")?)
//!     .with_order_store(InMemoryOrderStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, ErrorResponse, OrderError, RequestError, StorageError, TrackerError,
            ValidationError,
        },
        field::{PhoneNumber, normalize_date, normalize_phone},
        order::{NewOrder, Order, OrderId, OrderStatus},
        query::{Clause, OrderPredicate, SearchParams, build_predicate},
        service::OrderService,
        store::{OrderStore, SignatureStore, SignatureUpload},
        validation::{OrderPatch, OrderPayload, OrderValidator},
    };

    // === Storage ===
    pub use crate::storage::{FsSignatureStore, InMemoryOrderStore, InMemorySignatureStore};

    // === Config ===
    pub use crate::config::TrackerConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
