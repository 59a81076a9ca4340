use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column)
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_warranties_asset", "warranties", "asset_id"),
    ("idx_warranties_end_date", "warranties", "end_date"),
    ("idx_warranties_type", "warranties", "warranty_type_id"),
    ("idx_warranties_created_at", "warranties", "created_at"),
    ("idx_notification_warranty", "warranty_notification", "warranty_id"),
    ("idx_service_contract_asset", "service_contract", "asset_id"),
    ("idx_service_contract_type", "service_contract", "contract_type_id"),
    ("idx_service_request_asset", "service_request", "asset_id"),
    ("idx_service_request_date", "service_request", "service_date"),
    ("idx_service_request_item_request", "service_request_item", "service_request_id"),
    ("idx_service_history_asset", "service_history", "asset_id"),
    ("idx_service_history_date", "service_history", "service_date"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
