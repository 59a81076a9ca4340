//! Create `service_history` table.
//!
//! Same shape as `service_request` without the approver.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceHistory::ServiceHistoryId))
                    .col(string_len(ServiceHistory::AssetId, 128))
                    .col(string_len(ServiceHistory::TechnicianName, 255))
                    .col(string_len(ServiceHistory::ServiceSupplierName, 255))
                    .col(string_len(ServiceHistory::WarrantyStatus, 16))
                    .col(string_len_null(ServiceHistory::ServiceStatus, 64))
                    .col(timestamp_with_time_zone(ServiceHistory::ServiceDate))
                    .col(string_len_null(ServiceHistory::ServiceType, 128))
                    .col(text_null(ServiceHistory::ServiceDescription))
                    .col(timestamp_with_time_zone(ServiceHistory::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceHistory::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceHistory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceHistory {
    Table,
    ServiceHistoryId,
    AssetId,
    TechnicianName,
    ServiceSupplierName,
    WarrantyStatus,
    ServiceStatus,
    ServiceDate,
    ServiceType,
    ServiceDescription,
    CreatedAt,
    UpdatedAt,
}
