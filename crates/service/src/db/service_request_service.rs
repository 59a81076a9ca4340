use common::pagination::Pagination;
use common::serde_helpers;
use models::enums::WarrantyStatus;
use models::validation as check;
use models::{service_request, ServiceRequest};
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
pub struct CreateServiceRequestInput {
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub asset_id: String,
    pub technician_name: String,
    pub service_supplier_name: String,
    pub warranty_status: WarrantyStatus,
    #[serde(default)]
    pub service_status: Option<String>,
    #[serde(default)]
    pub approver_name: Option<String>,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub service_date: DateTimeWithTimeZone,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
}

impl CreateServiceRequestInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("assetId", &self.asset_id)?;
        check::non_empty("technicianName", &self.technician_name)?;
        check::non_empty("serviceSupplierName", &self.service_supplier_name)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateServiceRequestInput {
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
    #[serde(default)]
    pub approver_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub service_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
}

impl UpdateServiceRequestInput {
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
pub struct ServiceRequestListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub asset_id: Option<String>,
}

impl ServiceRequestListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<service_request::Entity> {
        let mut q = service_request::Entity::find();
        if let Some(v) = self.asset_id.as_deref() {
            q = q.filter(service_request::Column::AssetId.eq(v));
        }
        q.order_by_desc(service_request::Column::ServiceDate)
    }
}

pub async fn list_service_requests(
    db: &DatabaseConnection,
    query: &ServiceRequestListQuery,
) -> Result<Page<ServiceRequest>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn get_service_request(db: &DatabaseConnection, id: i32) -> Result<ServiceRequest, ServiceError> {
    service_request::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service request"))
}

pub async fn create_service_request(
    db: &DatabaseConnection,
    input: CreateServiceRequestInput,
) -> Result<ServiceRequest, ServiceError> {
    input.validate()?;
    let now = crate::now();
    let am = service_request::ActiveModel {
        asset_id: Set(input.asset_id),
        technician_name: Set(input.technician_name),
        service_supplier_name: Set(input.service_supplier_name),
        warranty_status: Set(input.warranty_status),
        service_status: Set(check::blank_to_none(input.service_status)),
        approver_name: Set(check::blank_to_none(input.approver_name)),
        service_date: Set(input.service_date),
        service_type: Set(check::blank_to_none(input.service_type)),
        service_description: Set(check::blank_to_none(input.service_description)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_service_request(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateServiceRequestInput,
) -> Result<ServiceRequest, ServiceError> {
    input.validate()?;
    let mut am = get_service_request(db, id).await?.into_active_model();
    if let Some(v) = input.asset_id { am.asset_id = Set(v); }
    if let Some(v) = input.technician_name { am.technician_name = Set(v); }
    if let Some(v) = input.service_supplier_name { am.service_supplier_name = Set(v); }
    if let Some(v) = input.warranty_status { am.warranty_status = Set(v); }
    if let Some(v) = input.service_status { am.service_status = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.approver_name { am.approver_name = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.service_date { am.service_date = Set(v); }
    if let Some(v) = input.service_type { am.service_type = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.service_description { am.service_description = Set(check::blank_to_none(Some(v))); }
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

/// Items of the request are removed with it.
pub async fn delete_service_request(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_request::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service request"));
    }
    Ok(())
}

pub async fn list_by_asset(db: &DatabaseConnection, asset_id: &str) -> Result<Vec<ServiceRequest>, ServiceError> {
    Ok(service_request::Entity::find()
        .filter(service_request::Column::AssetId.eq(asset_id))
        .order_by_desc(service_request::Column::ServiceDate)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};
    use chrono::{Duration, Utc};

    fn input(asset_id: &str, days_ago: i64) -> CreateServiceRequestInput {
        CreateServiceRequestInput {
            asset_id: asset_id.to_string(),
            technician_name: "R. Iyer".into(),
            service_supplier_name: "CoolAir Services".into(),
            warranty_status: WarrantyStatus::Active,
            service_status: Some("OPEN".into()),
            approver_name: Some("M. Chen".into()),
            service_date: (Utc::now() - Duration::days(days_ago)).into(),
            service_type: Some("Repair".into()),
            service_description: None,
        }
    }

    #[test]
    fn warranty_status_is_required_and_closed() {
        let missing = serde_json::from_value::<CreateServiceRequestInput>(serde_json::json!({
            "assetId": "A", "technicianName": "T", "serviceSupplierName": "S", "serviceDate": "2025-02-01"
        }));
        assert!(missing.is_err());
        let unknown = serde_json::from_value::<CreateServiceRequestInput>(serde_json::json!({
            "assetId": "A", "technicianName": "T", "serviceSupplierName": "S",
            "serviceDate": "2025-02-01", "warrantyStatus": "PENDING"
        }));
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn requests_for_asset_are_newest_first() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let asset = unique("asset");
        let older = create_service_request(&db, input(&asset, 10)).await?;
        let newer = create_service_request(&db, input(&asset, 1)).await?;

        let page = list_service_requests(
            &db,
            &ServiceRequestListQuery { asset_id: Some(asset.clone()), limit: Some(1), page: Some(1) },
        )
        .await?;
        assert_eq!(page.info.total, 2);
        assert_eq!(page.info.pages, 2);
        assert!(page.info.has_next_page);
        assert_eq!(page.items[0].service_request_id, newer.service_request_id);

        let updated = update_service_request(
            &db,
            older.service_request_id,
            UpdateServiceRequestInput { warranty_status: Some(WarrantyStatus::Expired), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.warranty_status, WarrantyStatus::Expired);
        assert_eq!(updated.approver_name.as_deref(), Some("M. Chen"));

        assert_eq!(list_by_asset(&db, &asset).await?.len(), 2);
        delete_service_request(&db, older.service_request_id).await?;
        delete_service_request(&db, newer.service_request_id).await?;
        assert!(matches!(
            get_service_request(&db, newer.service_request_id).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}
