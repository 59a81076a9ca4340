use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lead time before expiry at which a consumer wants to be notified.
pub const DEFAULT_NOTIFICATION_DAYS: i32 = 30;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "consumer_preference")]
#[serde(rename_all = "camelCase")]
#[schema(as = ConsumerPreference)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub preference_id: i32,
    #[sea_orm(unique)]
    pub consumer_id: String,
    pub notification_days: i32,
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
