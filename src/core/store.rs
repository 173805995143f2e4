//! Storage traits consumed by the order service
//!
//! The service is agnostic to the underlying storage mechanism; it only needs
//! these contracts. Backends report failures as `anyhow::Error` and the
//! service wraps them into [`StorageError`](crate::core::error::StorageError).

use crate::core::order::{NewOrder, Order, OrderId};
use crate::core::query::OrderPredicate;
use anyhow::Result;
use async_trait::async_trait;

/// Persistence of order records
///
/// Implementations own id assignment and uniqueness. Each call is atomic on
/// its own; nothing spans two calls.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order under a fresh id
    async fn create(&self, order: NewOrder) -> Result<Order>;

    /// Get an order by id
    async fn get(&self, id: &OrderId) -> Result<Option<Order>>;

    /// Replace an existing order
    ///
    /// Fails if no order with this id exists.
    async fn update(&self, id: &OrderId, order: Order) -> Result<Order>;

    /// Delete an order, returning whether it existed
    async fn delete(&self, id: &OrderId) -> Result<bool>;

    /// All orders matching the predicate, in insertion order
    async fn query(&self, predicate: &OrderPredicate) -> Result<Vec<Order>>;
}

/// An uploaded signature image
#[derive(Debug, Clone)]
pub struct SignatureUpload {
    /// Client-side file name, used only for its extension
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SignatureUpload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase file extension for the stored image
    ///
    /// Taken from the file name when it is short and alphanumeric, else from
    /// the content type, else `png`.
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        if let Some(ext) = from_name {
            return ext.to_ascii_lowercase();
        }

        match self.content_type.as_deref() {
            Some("image/jpeg") => "jpg".to_string(),
            Some("image/gif") => "gif".to_string(),
            Some("image/webp") => "webp".to_string(),
            Some("image/svg+xml") => "svg".to_string(),
            _ => "png".to_string(),
        }
    }
}

/// Storage of signature images
#[async_trait]
pub trait SignatureStore: Send + Sync {
    /// Store the image for an order and return its reference
    ///
    /// Storing again for the same order replaces the previous reference.
    async fn save(&self, order_id: &OrderId, upload: SignatureUpload) -> Result<String>;
}
