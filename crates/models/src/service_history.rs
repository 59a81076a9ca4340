use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::enums::WarrantyStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "service_history")]
#[serde(rename_all = "camelCase")]
#[schema(as = ServiceHistory)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub service_history_id: i32,
    pub asset_id: String,
    pub technician_name: String,
    pub service_supplier_name: String,
    pub warranty_status: WarrantyStatus,
    pub service_status: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub service_date: DateTimeWithTimeZone,
    pub service_type: Option<String>,
    pub service_description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
