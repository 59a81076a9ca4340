//! Create `service_contract` table with FKs to `contract_type` and
//! optional `service_contract_status`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceContract::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceContract::ContractId))
                    .col(string_len(ServiceContract::ContractNumber, 128).unique_key())
                    .col(integer(ServiceContract::ContractTypeId))
                    .col(string_len(ServiceContract::AssetId, 128))
                    .col(string_len(ServiceContract::ServiceSupplierId, 128))
                    .col(string_len(ServiceContract::ContractName, 255))
                    .col(timestamp_with_time_zone(ServiceContract::StartDate))
                    .col(timestamp_with_time_zone(ServiceContract::EndDate))
                    .col(string_len(ServiceContract::PaymentTerms, 32).default("YEARLY"))
                    .col(string_len(ServiceContract::CoverageType, 32).default("COMPREHENSIVE"))
                    .col(text_null(ServiceContract::Includes))
                    .col(text_null(ServiceContract::Excludes))
                    .col(string_len(ServiceContract::ServiceFrequency, 32).default("AS_REQUIRED"))
                    .col(boolean(ServiceContract::PreventiveMaintenanceIncluded).default(false))
                    .col(boolean(ServiceContract::BreakdownMaintenanceIncluded).default(false))
                    .col(boolean(ServiceContract::AutoRenewal).default(false))
                    .col(string_len_null(ServiceContract::CreatedBy, 128))
                    .col(string_len_null(ServiceContract::UpdatedBy, 128))
                    .col(integer_null(ServiceContract::StatusId))
                    .col(timestamp_with_time_zone(ServiceContract::CreatedAt))
                    .col(timestamp_with_time_zone(ServiceContract::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_contract_contract_type")
                            .from(ServiceContract::Table, ServiceContract::ContractTypeId)
                            .to(ContractType::Table, ContractType::ContractTypeId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_contract_status")
                            .from(ServiceContract::Table, ServiceContract::StatusId)
                            .to(ServiceContractStatus::Table, ServiceContractStatus::StatusId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceContract::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceContract {
    Table,
    ContractId,
    ContractNumber,
    ContractTypeId,
    AssetId,
    ServiceSupplierId,
    ContractName,
    StartDate,
    EndDate,
    PaymentTerms,
    CoverageType,
    Includes,
    Excludes,
    ServiceFrequency,
    PreventiveMaintenanceIncluded,
    BreakdownMaintenanceIncluded,
    AutoRenewal,
    CreatedBy,
    UpdatedBy,
    StatusId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContractType { Table, ContractTypeId }

#[derive(DeriveIden)]
enum ServiceContractStatus { Table, StatusId }
