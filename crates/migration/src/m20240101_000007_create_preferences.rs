//! Create `consumer_preference` and `supplier_preference` tables.
//!
//! One row per consumer/supplier holding the notification lead time in days.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsumerPreference::Table)
                    .if_not_exists()
                    .col(pk_auto(ConsumerPreference::PreferenceId))
                    .col(string_len(ConsumerPreference::ConsumerId, 128).unique_key())
                    .col(integer(ConsumerPreference::NotificationDays).default(30))
                    .col(timestamp_with_time_zone(ConsumerPreference::CreatedAt))
                    .col(timestamp_with_time_zone(ConsumerPreference::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(SupplierPreference::Table)
                    .if_not_exists()
                    .col(pk_auto(SupplierPreference::PreferenceId))
                    .col(string_len(SupplierPreference::SupplierId, 128).unique_key())
                    .col(integer(SupplierPreference::NotificationDays).default(30))
                    .col(timestamp_with_time_zone(SupplierPreference::CreatedAt))
                    .col(timestamp_with_time_zone(SupplierPreference::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupplierPreference::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ConsumerPreference::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConsumerPreference { Table, PreferenceId, ConsumerId, NotificationDays, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum SupplierPreference { Table, PreferenceId, SupplierId, NotificationDays, CreatedAt, UpdatedAt }
