//! Indexes for the listing queries.
//! `findAll` filters on `available` and pages in id order.
use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_product::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_available_id")
                    .table(Product::Table)
                    .col(Product::Available)
                    .col(Product::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_available_id").table(Product::Table).to_owned())
            .await
    }
}
