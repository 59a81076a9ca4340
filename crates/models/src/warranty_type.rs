use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::warranty;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "warranty_type")]
#[serde(rename_all = "camelCase")]
#[schema(as = WarrantyType)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub warranty_type_id: i32,
    #[sea_orm(unique)]
    pub type_name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Warranties }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Warranties => Entity::has_many(warranty::Entity).into(),
        }
    }
}

impl Related<warranty::Entity> for Entity {
    fn to() -> RelationDef { Relation::Warranties.def() }
}

impl ActiveModelBehavior for ActiveModel {}
