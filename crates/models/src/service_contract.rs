//! `service_contract`: AMC/CMC style maintenance agreements per asset.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract_type;
use crate::enums::{ContractCoverageType, PaymentTerms, ServiceFrequency};
use crate::service_contract_status;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "service_contract")]
#[serde(rename_all = "camelCase")]
#[schema(as = ServiceContract)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub contract_id: i32,
    #[sea_orm(unique)]
    pub contract_number: String,
    pub contract_type_id: i32,
    pub asset_id: String,
    pub service_supplier_id: String,
    pub contract_name: String,
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub end_date: DateTimeWithTimeZone,
    pub payment_terms: PaymentTerms,
    pub coverage_type: ContractCoverageType,
    pub includes: Option<String>,
    pub excludes: Option<String>,
    pub service_frequency: ServiceFrequency,
    pub preventive_maintenance_included: bool,
    pub breakdown_maintenance_included: bool,
    pub auto_renewal: bool,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub status_id: Option<i32>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ContractType, Status }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ContractType => Entity::belongs_to(contract_type::Entity)
                .from(Column::ContractTypeId)
                .to(contract_type::Column::ContractTypeId)
                .into(),
            Relation::Status => Entity::belongs_to(service_contract_status::Entity)
                .from(Column::StatusId)
                .to(service_contract_status::Column::StatusId)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<contract_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::ContractType.def() }
}

impl Related<service_contract_status::Entity> for Entity {
    fn to() -> RelationDef { Relation::Status.def() }
}

impl ActiveModelBehavior for ActiveModel {}
