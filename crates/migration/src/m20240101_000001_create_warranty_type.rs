//! Create `warranty_type` table.
//!
//! Lookup table referenced by `warranties`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarrantyType::Table)
                    .if_not_exists()
                    .col(pk_auto(WarrantyType::WarrantyTypeId))
                    .col(string_len(WarrantyType::TypeName, 128).unique_key())
                    .col(text_null(WarrantyType::Description))
                    .col(timestamp_with_time_zone(WarrantyType::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WarrantyType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WarrantyType { Table, WarrantyTypeId, TypeName, Description, CreatedAt }
