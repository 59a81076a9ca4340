//! Completed service records per asset, same shape as service requests
//! without the approver.

use common::pagination::Pagination;
use common::serde_helpers;
use models::enums::WarrantyStatus;
use models::validation as check;
use models::{service_history, ServiceHistory};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    Select, Set,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateServiceHistoryInput {
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub asset_id: String,
    pub technician_name: String,
    pub service_supplier_name: String,
    pub warranty_status: WarrantyStatus,
    #[serde(default)]
    pub service_status: Option<String>,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub service_date: DateTimeWithTimeZone,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
}

impl CreateServiceHistoryInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("assetId", &self.asset_id)?;
        check::non_empty("technicianName", &self.technician_name)?;
        check::non_empty("serviceSupplierName", &self.service_supplier_name)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateServiceHistoryInput {
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub service_supplier_name: Option<String>,
    #[serde(default)]
    pub warranty_status: Option<WarrantyStatus>,
    #[serde(default)]
    pub service_status: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub service_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
}

impl UpdateServiceHistoryInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty_opt("assetId", self.asset_id.as_deref())?;
        check::non_empty_opt("technicianName", self.technician_name.as_deref())?;
        check::non_empty_opt("serviceSupplierName", self.service_supplier_name.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceHistoryListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub asset_id: Option<String>,
}

impl ServiceHistoryListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<service_history::Entity> {
        let mut q = service_history::Entity::find();
        if let Some(v) = self.asset_id.as_deref() {
            q = q.filter(service_history::Column::AssetId.eq(v));
        }
        q.order_by_desc(service_history::Column::ServiceDate)
    }
}

pub async fn list_service_history(
    db: &DatabaseConnection,
    query: &ServiceHistoryListQuery,
) -> Result<Page<ServiceHistory>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn get_service_history(db: &DatabaseConnection, id: i32) -> Result<ServiceHistory, ServiceError> {
    service_history::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service history record"))
}

pub async fn create_service_history(
    db: &DatabaseConnection,
    input: CreateServiceHistoryInput,
) -> Result<ServiceHistory, ServiceError> {
    input.validate()?;
    let now = crate::now();
    let am = service_history::ActiveModel {
        asset_id: Set(input.asset_id),
        technician_name: Set(input.technician_name),
        service_supplier_name: Set(input.service_supplier_name),
        warranty_status: Set(input.warranty_status),
        service_status: Set(check::blank_to_none(input.service_status)),
        service_date: Set(input.service_date),
        service_type: Set(check::blank_to_none(input.service_type)),
        service_description: Set(check::blank_to_none(input.service_description)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_service_history(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateServiceHistoryInput,
) -> Result<ServiceHistory, ServiceError> {
    input.validate()?;
    let mut am = get_service_history(db, id).await?.into_active_model();
    if let Some(v) = input.asset_id { am.asset_id = Set(v); }
    if let Some(v) = input.technician_name { am.technician_name = Set(v); }
    if let Some(v) = input.service_supplier_name { am.service_supplier_name = Set(v); }
    if let Some(v) = input.warranty_status { am.warranty_status = Set(v); }
    if let Some(v) = input.service_status { am.service_status = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.service_date { am.service_date = Set(v); }
    if let Some(v) = input.service_type { am.service_type = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.service_description { am.service_description = Set(check::blank_to_none(Some(v))); }
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn delete_service_history(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_history::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service history record"));
    }
    Ok(())
}

pub async fn list_by_asset(db: &DatabaseConnection, asset_id: &str) -> Result<Vec<ServiceHistory>, ServiceError> {
    Ok(service_history::Entity::find()
        .filter(service_history::Column::AssetId.eq(asset_id))
        .order_by_desc(service_history::Column::ServiceDate)
        .all(db)
        .await?)
}
