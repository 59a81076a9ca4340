//! Create `service_contract_status` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceContractStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceContractStatus::StatusId))
                    .col(string_len(ServiceContractStatus::Name, 64).unique_key())
                    .col(timestamp_with_time_zone(ServiceContractStatus::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceContractStatus::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceContractStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceContractStatus { Table, StatusId, Name, CreatedAt, UpdatedAt }
