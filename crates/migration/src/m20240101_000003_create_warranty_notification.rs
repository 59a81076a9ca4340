//! Create `warranty_notification` table with FK to `warranties`.
//!
//! Notifications are stored rows only; deleting a warranty removes them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarrantyNotification::Table)
                    .if_not_exists()
                    .col(pk_auto(WarrantyNotification::NotificationId))
                    .col(integer(WarrantyNotification::WarrantyId))
                    .col(string_len(WarrantyNotification::NotificationType, 32))
                    .col(text(WarrantyNotification::Message))
                    .col(string_len_null(WarrantyNotification::RecipientEmail, 255))
                    .col(timestamp_with_time_zone_null(WarrantyNotification::SentDate))
                    .col(boolean(WarrantyNotification::IsSent).default(false))
                    .col(timestamp_with_time_zone(WarrantyNotification::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warranty_notification_warranty")
                            .from(WarrantyNotification::Table, WarrantyNotification::WarrantyId)
                            .to(Warranties::Table, Warranties::WarrantyId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarrantyNotification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WarrantyNotification {
    Table,
    NotificationId,
    WarrantyId,
    NotificationType,
    Message,
    RecipientEmail,
    SentDate,
    IsSent,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Warranties { Table, WarrantyId }
