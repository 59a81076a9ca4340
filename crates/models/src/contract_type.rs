use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{enums::ContractTypeName, service_contract};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "contract_type")]
#[serde(rename_all = "camelCase")]
#[schema(as = ContractType)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub contract_type_id: i32,
    pub type_name: ContractTypeName,
    #[sea_orm(unique)]
    pub type_code: String,
    pub description: Option<String>,
    pub contract_duration_months: Option<i32>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Contracts }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Contracts => Entity::has_many(service_contract::Entity).into(),
        }
    }
}

impl Related<service_contract::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contracts.def() }
}

impl ActiveModelBehavior for ActiveModel {}
