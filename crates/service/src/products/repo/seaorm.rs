use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use models::product::{self, Entity as ProductEntity};

use crate::errors::ServiceError;
use crate::products::domain::{CreateProduct, Product, ProductChanges};
use crate::products::repository::ProductRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn insert(&self, input: CreateProduct) -> Result<Product, ServiceError> {
        Ok(product::create(&self.db, &input.name, input.price).await?)
    }

    async fn count_available(&self) -> Result<u64, ServiceError> {
        let n = ProductEntity::find()
            .filter(product::Column::Available.eq(true))
            .count(&self.db)
            .await?;
        Ok(n)
    }

    async fn list_available(&self, skip: u64, take: u64) -> Result<Vec<Product>, ServiceError> {
        let rows = ProductEntity::find()
            .filter(product::Column::Available.eq(true))
            .order_by_asc(product::Column::Id)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_available(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let found = ProductEntity::find()
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::Available.eq(true))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> Result<Product, ServiceError> {
        let mut am: product::ActiveModel = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::product_not_found(id))?
            .into();
        if let Some(name) = changes.name { am.name = Set(name); }
        if let Some(price) = changes.price { am.price = Set(price); }
        if let Some(available) = changes.available { am.available = Set(available); }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        Ok(updated)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, ServiceError> {
        let rows = ProductEntity::find()
            .filter(product::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
