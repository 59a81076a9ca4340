//! Create `contract_type` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContractType::Table)
                    .if_not_exists()
                    .col(pk_auto(ContractType::ContractTypeId))
                    .col(string_len(ContractType::TypeName, 32))
                    .col(string_len(ContractType::TypeCode, 64).unique_key())
                    .col(text_null(ContractType::Description))
                    .col(integer_null(ContractType::ContractDurationMonths))
                    .col(timestamp_with_time_zone(ContractType::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContractType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContractType { Table, ContractTypeId, TypeName, TypeCode, Description, ContractDurationMonths, CreatedAt }
