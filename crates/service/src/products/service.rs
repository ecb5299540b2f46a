use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{CreateProduct, Product, ProductChanges, UpdateProduct};
use super::repository::ProductRepository;
use crate::errors::ServiceError;
use crate::pagination::{PageMeta, Paginated, PaginationDto};

/// Product store.
///
/// A product is visible to `find_one`, `find_all`, `update` and `remove` only
/// while `available` is true. `remove` is a soft delete and the only way a row
/// leaves that set.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> Clone for ProductService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Insert a new, available product.
    ///
    /// # Examples
    /// ```
    /// use service::products::{ProductService, domain::CreateProduct, repository::mock::InMemoryProductRepository};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// let p = tokio_test::block_on(svc.create(CreateProduct { name: "Keyboard".into(), price: 49.9 })).unwrap();
    /// assert!(p.available);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> Result<Product, ServiceError> {
        let product = self.repo.insert(input).await?;
        info!(product_id = product.id, "product_created");
        Ok(product)
    }

    /// One page of available products in insertion order.
    ///
    /// # Examples
    /// ```
    /// use service::products::{ProductService, domain::CreateProduct, repository::mock::InMemoryProductRepository};
    /// use service::pagination::PaginationDto;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// for i in 0..3 {
    ///     tokio_test::block_on(svc.create(CreateProduct { name: format!("p{i}"), price: 1.0 })).unwrap();
    /// }
    /// let page = tokio_test::block_on(svc.find_all(PaginationDto::new(1, 2))).unwrap();
    /// assert_eq!(page.data.len(), 2);
    /// assert_eq!(page.meta.last_page, 2);
    /// assert_eq!(page.meta.total_pages, 3);
    /// ```
    #[instrument(skip(self))]
    pub async fn find_all(&self, pagination: PaginationDto) -> Result<Paginated<Product>, ServiceError> {
        let total = self.repo.count_available().await?;
        let last_page = pagination.last_page(total);
        let data = self.repo.list_available(pagination.offset(), u64::from(pagination.limit)).await?;
        debug!(total, last_page, returned = data.len(), "product_page");
        Ok(Paginated {
            data,
            meta: PageMeta { total_pages: total, page: u64::from(pagination.page), last_page },
        })
    }

    /// Available product by id. Missing and soft-deleted ids fail the same way.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i32) -> Result<Product, ServiceError> {
        self.repo
            .find_available(id)
            .await?
            .ok_or_else(|| ServiceError::product_not_found(id))
    }

    /// Apply a partial update to an available product. The payload's own `id` is ignored.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProduct) -> Result<Product, ServiceError> {
        self.find_one(id).await?;
        if let Some(ignored) = input.id.filter(|embedded| *embedded != id) {
            debug!(ignored, "payload id ignored");
        }
        self.repo.update(id, input.into_changes()).await
    }

    /// Soft delete: marks the product unavailable and returns it.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<Product, ServiceError> {
        self.find_one(id).await?;
        let product = self.repo.update(id, ProductChanges::soft_delete()).await?;
        info!(product_id = id, "product_removed");
        Ok(product)
    }

    /// Check that every id exists, whether available or not.
    ///
    /// Duplicates collapse; the fetched rows are returned.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn validate_products(&self, ids: &[i32]) -> Result<Vec<Product>, ServiceError> {
        let unique: Vec<i32> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let products = self.repo.find_by_ids(&unique).await?;
        if products.len() != unique.len() {
            warn!(requested = unique.len(), found = products.len(), "unknown product ids");
            return Err(ServiceError::InvalidArgument("Some products were not found".into()));
        }
        Ok(products)
    }
}
