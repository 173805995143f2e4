//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! The `order_store_tests!` macro generates a test module that validates any
//! `OrderStore` implementation against the full contract: CRUD operations,
//! predicate queries and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use order_tracker::storage::InMemoryOrderStore;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get` — create then retrieve, verify all fields
//! - `test_get_nonexistent` — get with random id returns None
//! - `test_update_existing` — mutate fields, verify persisted
//! - `test_update_nonexistent` — update unknown id returns Err
//! - `test_delete_existing` — delete then get returns None
//! - `test_delete_nonexistent` — delete unknown id returns false
//!
//! ## Query
//! - `test_query_nothing` — `OrderPredicate::Nothing` matches no order
//! - `test_query_conjunction` — every clause must hold
//! - `test_query_day_month_ignores_year`
//!
//! ## Concurrency
//! - `test_concurrent_creates` — parallel creates from spawned tasks

/// Generate a full `OrderStore` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent test, the
/// returned store must also implement `Clone + 'static`.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use order_tracker::core::order::OrderStatus;
            use order_tracker::core::query::{Clause, OrderPredicate};
            use order_tracker::core::store::OrderStore;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;
                let created = store
                    .create(new_order("Bob", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();

                assert_eq!(created.receiver_name, "Bob");
                assert_eq!(created.status, OrderStatus::Pending);
                assert!(created.signature.is_none());

                let retrieved = store.get(&created.id).await.unwrap();
                assert_eq!(retrieved, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let mut order = store
                    .create(new_order("Bob", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();
                let id = order.id;

                order.address = "2 Road".to_string();
                order.status = OrderStatus::Processing;
                store.update(&id, order).await.unwrap();

                let retrieved = store.get(&id).await.unwrap().unwrap();
                assert_eq!(retrieved.address, "2 Road");
                assert_eq!(retrieved.status, OrderStatus::Processing);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let order = new_order("Bob", "Acme", ymd(2024, 3, 15)).into_order(Uuid::new_v4());
                let id = order.id;
                assert!(store.update(&id, order).await.is_err());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let created = store
                    .create(new_order("Bob", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();

                assert!(store.delete(&created.id).await.unwrap());
                assert!(store.get(&created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                assert!(!store.delete(&Uuid::new_v4()).await.unwrap());
            }

            // ==================================================================
            // Query
            // ==================================================================

            #[tokio::test]
            async fn test_query_nothing() {
                let store = $factory;
                store
                    .create(new_order("Bob", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();

                let found = store.query(&OrderPredicate::Nothing).await.unwrap();
                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_query_conjunction() {
                let store = $factory;
                store
                    .create(new_order("Bob", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();
                store
                    .create(new_order("Bobby", "Globex", ymd(2024, 3, 15)))
                    .await
                    .unwrap();
                store
                    .create(new_order("Alice", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();

                let predicate = OrderPredicate::All(vec![
                    Clause::ReceiverNameContains("BOB".to_string()),
                    Clause::CustomerNameContains("acme".to_string()),
                ]);
                let found = store.query(&predicate).await.unwrap();

                assert_eq!(found.len(), 1);
                assert_eq!(found[0].receiver_name, "Bob");
            }

            #[tokio::test]
            async fn test_query_day_month_ignores_year() {
                let store = $factory;
                store
                    .create(new_order("A", "Acme", ymd(2023, 3, 15)))
                    .await
                    .unwrap();
                store
                    .create(new_order("B", "Acme", ymd(2024, 3, 15)))
                    .await
                    .unwrap();
                store
                    .create(new_order("C", "Acme", ymd(2024, 3, 16)))
                    .await
                    .unwrap();

                let predicate = OrderPredicate::All(vec![Clause::DayMonth { day: 15, month: 3 }]);
                let found = store.query(&predicate).await.unwrap();

                assert_eq!(found.len(), 2);
                assert!(found.iter().all(|o| o.receiver_name != "C"));
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .create(new_order(&format!("R{}", i), "Acme", ymd(2024, 1, 1)))
                            .await
                            .unwrap()
                            .id
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap());
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10);

                for id in &ids {
                    assert!(store.get(id).await.unwrap().is_some());
                }
            }
        }
    };
}
