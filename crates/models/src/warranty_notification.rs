use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{enums::NotificationType, warranty};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "warranty_notification")]
#[serde(rename_all = "camelCase")]
#[schema(as = WarrantyNotification)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub notification_id: i32,
    pub warranty_id: i32,
    pub notification_type: NotificationType,
    pub message: String,
    pub recipient_email: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub sent_date: Option<DateTimeWithTimeZone>,
    pub is_sent: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Warranty }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Warranty => Entity::belongs_to(warranty::Entity)
                .from(Column::WarrantyId)
                .to(warranty::Column::WarrantyId)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<warranty::Entity> for Entity {
    fn to() -> RelationDef { Relation::Warranty.def() }
}

impl ActiveModelBehavior for ActiveModel {}
