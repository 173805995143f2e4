//! Core module containing the order model, validation, search and service

pub mod error;
pub mod field;
pub mod order;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{
    ConfigError, ErrorResponse, OrderError, RequestError, StorageError, TrackerError,
    ValidationError,
};
pub use field::{PhoneNumber, normalize_date, normalize_phone};
pub use order::{NewOrder, Order, OrderId, OrderStatus};
pub use query::{Clause, OrderPredicate, SearchParams, build_predicate};
pub use service::OrderService;
pub use store::{OrderStore, SignatureStore, SignatureUpload};
pub use validation::{OrderPatch, OrderPayload, OrderValidator};
