use async_trait::async_trait;

use super::domain::{CreateProduct, Product, ProductChanges};
use crate::errors::ServiceError;

/// Persistence capability the product store is built on.
///
/// Every method is a single statement against the `product` table; the store
/// composes them and owns the visibility rules.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, input: CreateProduct) -> Result<Product, ServiceError>;
    async fn count_available(&self) -> Result<u64, ServiceError>;
    /// Available rows in ascending id order.
    async fn list_available(&self, skip: u64, take: u64) -> Result<Vec<Product>, ServiceError>;
    async fn find_available(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    async fn update(&self, id: i32, changes: ProductChanges) -> Result<Product, ServiceError>;
    /// Rows whose id is in `ids`, available or not.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        rows: Mutex<Rows>,
    }

    #[derive(Default)]
    struct Rows {
        next_id: i32,
        by_id: BTreeMap<i32, Product>,
    }

    impl InMemoryProductRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
        }

        /// Number of stored rows, soft-deleted ones included.
        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.by_id.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn insert(&self, input: CreateProduct) -> Result<Product, ServiceError> {
            let mut rows = self.rows()?;
            rows.next_id += 1;
            let now = Utc::now().into();
            let product = Product {
                id: rows.next_id,
                name: input.name,
                price: input.price,
                available: true,
                created_at: now,
                updated_at: now,
            };
            rows.by_id.insert(product.id, product.clone());
            Ok(product)
        }

        async fn count_available(&self) -> Result<u64, ServiceError> {
            Ok(self.rows()?.by_id.values().filter(|p| p.available).count() as u64)
        }

        async fn list_available(&self, skip: u64, take: u64) -> Result<Vec<Product>, ServiceError> {
            let rows = self.rows()?;
            Ok(rows
                .by_id
                .values()
                .filter(|p| p.available)
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(usize::try_from(take).unwrap_or(usize::MAX))
                .cloned()
                .collect())
        }

        async fn find_available(&self, id: i32) -> Result<Option<Product>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).filter(|p| p.available).cloned())
        }

        async fn update(&self, id: i32, changes: ProductChanges) -> Result<Product, ServiceError> {
            let mut rows = self.rows()?;
            let product = rows.by_id.get_mut(&id).ok_or_else(|| ServiceError::product_not_found(id))?;
            if let Some(name) = changes.name { product.name = name; }
            if let Some(price) = changes.price { product.price = price; }
            if let Some(available) = changes.available { product.available = available; }
            product.updated_at = Utc::now().into();
            Ok(product.clone())
        }

        async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ServiceError> {
            let rows = self.rows()?;
            Ok(ids.iter().filter_map(|id| rows.by_id.get(id).cloned()).collect())
        }
    }
}
