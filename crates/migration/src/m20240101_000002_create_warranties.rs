//! Create `warranties` table with FK to `warranty_type`.
//!
//! A type still referenced by a warranty cannot be deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Warranties::Table)
                    .if_not_exists()
                    .col(pk_auto(Warranties::WarrantyId))
                    .col(string_len(Warranties::AssetId, 128))
                    .col(integer(Warranties::WarrantyTypeId))
                    .col(string_len_null(Warranties::WarrantySupplierId, 128))
                    .col(string_len_null(Warranties::WarrantyNumber, 128).unique_key())
                    .col(timestamp_with_time_zone(Warranties::StartDate))
                    .col(timestamp_with_time_zone(Warranties::EndDate))
                    .col(integer_null(Warranties::WarrantyPeriod))
                    .col(string_len_null(Warranties::CoverageType, 128))
                    .col(text_null(Warranties::CoverageDescription))
                    .col(text_null(Warranties::TermsConditions))
                    .col(double_null(Warranties::Cost))
                    .col(boolean(Warranties::IsActive).default(true))
                    .col(boolean(Warranties::AutoRenewal).default(false))
                    .col(string_len_null(Warranties::ConsumerId, 128))
                    .col(string_len_null(Warranties::SupplierId, 128))
                    .col(timestamp_with_time_zone(Warranties::CreatedAt))
                    .col(timestamp_with_time_zone(Warranties::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warranties_warranty_type")
                            .from(Warranties::Table, Warranties::WarrantyTypeId)
                            .to(WarrantyType::Table, WarrantyType::WarrantyTypeId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Warranties::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Warranties {
    Table,
    WarrantyId,
    AssetId,
    WarrantyTypeId,
    WarrantySupplierId,
    WarrantyNumber,
    StartDate,
    EndDate,
    WarrantyPeriod,
    CoverageType,
    CoverageDescription,
    TermsConditions,
    Cost,
    IsActive,
    AutoRenewal,
    ConsumerId,
    SupplierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WarrantyType { Table, WarrantyTypeId }
