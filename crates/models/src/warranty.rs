//! `warranties`: one coverage record per asset and supplier.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{warranty_notification, warranty_type};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "warranties")]
#[serde(rename_all = "camelCase")]
#[schema(as = Warranty)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub warranty_id: i32,
    pub asset_id: String,
    pub warranty_type_id: i32,
    pub warranty_supplier_id: Option<String>,
    #[sea_orm(unique)]
    pub warranty_number: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub end_date: DateTimeWithTimeZone,
    /// months
    pub warranty_period: Option<i32>,
    pub coverage_type: Option<String>,
    pub coverage_description: Option<String>,
    pub terms_conditions: Option<String>,
    pub cost: Option<f64>,
    pub is_active: bool,
    pub auto_renewal: bool,
    pub consumer_id: Option<String>,
    pub supplier_id: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { WarrantyType, Notifications }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::WarrantyType => Entity::belongs_to(warranty_type::Entity)
                .from(Column::WarrantyTypeId)
                .to(warranty_type::Column::WarrantyTypeId)
                .into(),
            Relation::Notifications => Entity::has_many(warranty_notification::Entity).into(),
        }
    }
}

impl Related<warranty_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::WarrantyType.def() }
}

impl Related<warranty_notification::Entity> for Entity {
    fn to() -> RelationDef { Relation::Notifications.def() }
}

impl ActiveModelBehavior for ActiveModel {}
