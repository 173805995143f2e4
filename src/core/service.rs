//! Order service: create, update, delete, sign and search orders
//!
//! Every operation is one self-contained pass: validate, then read and write
//! through the [`OrderStore`]. Nothing is cached between calls.

use crate::core::error::{OrderError, RequestError, Result, StorageError};
use crate::core::order::{Order, OrderId};
use crate::core::query::{SearchParams, build_predicate};
use crate::core::store::{OrderStore, SignatureStore, SignatureUpload};
use crate::core::validation::OrderValidator;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Orchestrates validation, normalization and storage of orders
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    signatures: Arc<dyn SignatureStore>,
    validator: OrderValidator,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        signatures: Arc<dyn SignatureStore>,
        validator: OrderValidator,
    ) -> Self {
        Self {
            store,
            signatures,
            validator,
        }
    }

    pub fn validator(&self) -> &OrderValidator {
        &self.validator
    }

    /// Create an order and return its id
    ///
    /// Nothing is persisted when validation fails.
    pub async fn create(&self, payload: &Map<String, Value>) -> Result<OrderId> {
        let new_order = self.validator.new_order(payload).inspect_err(|e| {
            tracing::debug!(error = %e, "order creation rejected");
        })?;

        let order = self
            .store
            .create(new_order)
            .await
            .map_err(|e| StorageError::record("create", e))?;

        tracing::info!(order_id = %order.id, status = %order.status, "order created");
        Ok(order.id)
    }

    /// Fetch one order
    pub async fn get(&self, id: &OrderId) -> Result<Order> {
        self.load(id).await
    }

    /// Apply a partial update and return the resulting order
    ///
    /// The whole payload is validated against the order as currently stored
    /// before anything changes. A payload with nothing applicable leaves the
    /// stored record untouched.
    pub async fn update(&self, id: &OrderId, payload: &Map<String, Value>) -> Result<Order> {
        let mut order = self.load(id).await?;

        let patch = self.validator.patch(&order, payload).inspect_err(|e| {
            tracing::debug!(order_id = %id, error = %e, "order update rejected");
        })?;

        if patch.is_empty() {
            tracing::debug!(order_id = %id, "update carried no applicable fields");
            return Ok(order);
        }

        patch.apply_to(&mut order);
        let order = self
            .store
            .update(id, order)
            .await
            .map_err(|e| StorageError::record("update", e))?;

        tracing::info!(order_id = %id, status = %order.status, "order updated");
        Ok(order)
    }

    /// Delete an order
    pub async fn delete(&self, id: &OrderId) -> Result<()> {
        let existed = self
            .store
            .delete(id)
            .await
            .map_err(|e| StorageError::record("delete", e))?;

        if !existed {
            return Err(OrderError::NotFound { id: *id }.into());
        }

        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Store a signature image and attach it to the order
    ///
    /// The order must exist; `None` or an empty file is `NoFileProvided`.
    pub async fn attach_signature(
        &self,
        id: &OrderId,
        upload: Option<SignatureUpload>,
    ) -> Result<Order> {
        let mut order = self.load(id).await?;

        let upload = upload
            .filter(|u| !u.is_empty())
            .ok_or(RequestError::NoFileProvided)?;
        let size = upload.bytes.len();

        let reference = self
            .signatures
            .save(id, upload)
            .await
            .map_err(StorageError::signature)?;

        order.signature = Some(reference);
        order.touch();
        let order = self
            .store
            .update(id, order)
            .await
            .map_err(|e| StorageError::record("update", e))?;

        tracing::info!(order_id = %id, bytes = size, "signature attached");
        Ok(order)
    }

    /// Find orders matching the search parameters
    ///
    /// A query without any non-empty value returns no orders and does not
    /// reach the store.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Order>> {
        let predicate = build_predicate(params)?;

        if predicate.is_nothing() {
            tracing::debug!("search without parameters, returning nothing");
            return Ok(Vec::new());
        }

        let orders = self
            .store
            .query(&predicate)
            .await
            .map_err(|e| StorageError::record("query", e))?;

        tracing::debug!(matches = orders.len(), ?predicate, "search completed");
        Ok(orders)
    }

    async fn load(&self, id: &OrderId) -> Result<Order> {
        self.store
            .get(id)
            .await
            .map_err(|e| StorageError::record("get", e))?
            .ok_or_else(|| OrderError::NotFound { id: *id }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{TrackerError, ValidationError};
    use crate::core::order::OrderStatus;
    use crate::core::query::OrderPredicate;
    use crate::storage::{InMemoryOrderStore, InMemorySignatureStore};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;

    fn service_with(store: Arc<dyn OrderStore>) -> OrderService {
        OrderService::new(
            store,
            Arc::new(InMemorySignatureStore::new()),
            OrderValidator::default(),
        )
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    /// Store that fails on every call
    struct BrokenStore;

    #[async_trait]
    impl OrderStore for BrokenStore {
        async fn create(&self, _: crate::core::order::NewOrder) -> anyhow::Result<Order> {
            Err(anyhow!("connection reset"))
        }
        async fn get(&self, _: &OrderId) -> anyhow::Result<Option<Order>> {
            Err(anyhow!("connection reset"))
        }
        async fn update(&self, _: &OrderId, _: Order) -> anyhow::Result<Order> {
            Err(anyhow!("connection reset"))
        }
        async fn delete(&self, _: &OrderId) -> anyhow::Result<bool> {
            Err(anyhow!("connection reset"))
        }
        async fn query(&self, _: &OrderPredicate) -> anyhow::Result<Vec<Order>> {
            Err(anyhow!("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_rejected_create_persists_nothing() {
        let store = InMemoryOrderStore::new();
        let service = service_with(Arc::new(store.clone()));

        let err = service
            .create(&payload(json!({ "date": "2024-01-01", "receiver_name": "A" })))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::MissingField { .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_storage_error() {
        let service = service_with(Arc::new(BrokenStore));
        let err = service.get(&OrderId::new_v4()).await.unwrap_err();

        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_empty_search_never_reaches_store() {
        // BrokenStore would fail any query
        let service = service_with(Arc::new(BrokenStore));
        let found = service.search(&SearchParams::default()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_nothing_applicable_keeps_timestamp() {
        let store = InMemoryOrderStore::new();
        let service = service_with(Arc::new(store.clone()));
        let id = service
            .create(&payload(json!({
                "date": "2024-01-01",
                "receiver_name": "A",
                "address": "X",
                "receiver_phone": "1",
                "customer_name": "B"
            })))
            .await
            .unwrap();
        let before = service.get(&id).await.unwrap();

        let after = service
            .update(&id, &payload(json!({ "unknown": true })))
            .await
            .unwrap();

        assert_eq!(after, before);
        assert_eq!(after.status, OrderStatus::Pending);
    }
}
