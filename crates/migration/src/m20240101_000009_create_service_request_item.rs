//! Create `service_request_item` table with FK to `service_request`.
//!
//! Items are removed together with their request.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequestItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRequestItem::ServiceRequestItemId))
                    .col(integer(ServiceRequestItem::ServiceRequestId))
                    .col(string_len(ServiceRequestItem::AssetId, 128))
                    .col(string_len(ServiceRequestItem::PartName, 255))
                    .col(double(ServiceRequestItem::PartCost))
                    .col(double(ServiceRequestItem::LabourCost))
                    .col(text_null(ServiceRequestItem::DefectDescription))
                    .col(timestamp_with_time_zone(ServiceRequestItem::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceRequestItem::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_item_request")
                            .from(ServiceRequestItem::Table, ServiceRequestItem::ServiceRequestId)
                            .to(ServiceRequest::Table, ServiceRequest::ServiceRequestId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceRequestItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRequestItem {
    Table,
    ServiceRequestItemId,
    ServiceRequestId,
    AssetId,
    PartName,
    PartCost,
    LabourCost,
    DefectDescription,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ServiceRequest { Table, ServiceRequestId }
