//! In-memory stores for testing and development

use crate::core::order::{NewOrder, Order, OrderId};
use crate::core::query::OrderPredicate;
use crate::core::store::{OrderStore, SignatureStore, SignatureUpload};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory order store
///
/// Keeps insertion order so search results come back oldest first. Uses
/// RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<IndexMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders
    ///
    /// A poisoned lock still holds every order written before the panic, so
    /// they are counted.
    pub fn len(&self) -> usize {
        match self.orders.read() {
            Ok(orders) => orders.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: NewOrder) -> Result<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let mut id = Uuid::new_v4();
        while orders.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let order = order.into_order(id);
        orders.insert(id, order.clone());

        Ok(order)
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.get(id).cloned())
    }

    async fn update(&self, id: &OrderId, order: Order) -> Result<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = orders
            .get_mut(id)
            .ok_or_else(|| anyhow!("Order not found: {}", id))?;
        *slot = Order { id: *id, ..order };

        Ok(slot.clone())
    }

    async fn delete(&self, id: &OrderId) -> Result<bool> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(orders.shift_remove(id).is_some())
    }

    async fn query(&self, predicate: &OrderPredicate) -> Result<Vec<Order>> {
        if predicate.is_nothing() {
            return Ok(Vec::new());
        }

        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders
            .values()
            .filter(|order| predicate.matches(order))
            .cloned()
            .collect())
    }
}

/// In-memory signature store
///
/// Keeps the uploaded bytes keyed by order id; references look like
/// `memory://signatures/<order_id>.<ext>`.
#[derive(Clone, Default)]
pub struct InMemorySignatureStore {
    images: Arc<RwLock<HashMap<OrderId, SignatureUpload>>>,
}

impl InMemorySignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored for an order, if any
    pub fn bytes(&self, order_id: &OrderId) -> Option<Vec<u8>> {
        self.images
            .read()
            .ok()
            .and_then(|images| images.get(order_id).map(|u| u.bytes.clone()))
    }
}

#[async_trait]
impl SignatureStore for InMemorySignatureStore {
    async fn save(&self, order_id: &OrderId, upload: SignatureUpload) -> Result<String> {
        let reference = format!("memory://signatures/{}.{}", order_id, upload.extension());

        let mut images = self
            .images
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        images.insert(*order_id, upload);

        Ok(reference)
    }
}
