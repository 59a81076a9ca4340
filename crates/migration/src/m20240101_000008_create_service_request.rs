//! Create `service_request` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRequest::ServiceRequestId))
                    .col(string_len(ServiceRequest::AssetId, 128))
                    .col(string_len(ServiceRequest::TechnicianName, 255))
                    .col(string_len(ServiceRequest::ServiceSupplierName, 255))
                    .col(string_len(ServiceRequest::WarrantyStatus, 16))
                    .col(string_len_null(ServiceRequest::ServiceStatus, 64))
                    .col(string_len_null(ServiceRequest::ApproverName, 255))
                    .col(timestamp_with_time_zone(ServiceRequest::ServiceDate))
                    .col(string_len_null(ServiceRequest::ServiceType, 128))
                    .col(text_null(ServiceRequest::ServiceDescription))
                    .col(timestamp_with_time_zone(ServiceRequest::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceRequest::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRequest {
    Table,
    ServiceRequestId,
    AssetId,
    TechnicianName,
    ServiceSupplierName,
    WarrantyStatus,
    ServiceStatus,
    ApproverName,
    ServiceDate,
    ServiceType,
    ServiceDescription,
    CreatedAt,
    UpdatedAt,
}
