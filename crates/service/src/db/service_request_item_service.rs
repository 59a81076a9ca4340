//! Line items (parts and labour) of a service request.

use common::pagination::Pagination;
use common::serde_helpers;
use models::validation as check;
use models::{service_request_item, ServiceRequestItem};
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
pub struct CreateServiceRequestItemInput {
    pub service_request_id: i32,
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub asset_id: String,
    pub part_name: String,
    /// must be > 0
    pub part_cost: f64,
    /// must be > 0
    pub labour_cost: f64,
    #[serde(default)]
    pub defect_description: Option<String>,
}

impl CreateServiceRequestItemInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("assetId", &self.asset_id)?;
        check::non_empty("partName", &self.part_name)?;
        check::positive("partCost", self.part_cost)?;
        check::positive("labourCost", self.labour_cost)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateServiceRequestItemInput {
    #[serde(default)]
    pub service_request_id: Option<i32>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub part_name: Option<String>,
    #[serde(default)]
    pub part_cost: Option<f64>,
    #[serde(default)]
    pub labour_cost: Option<f64>,
    #[serde(default)]
    pub defect_description: Option<String>,
}

impl UpdateServiceRequestItemInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty_opt("assetId", self.asset_id.as_deref())?;
        check::non_empty_opt("partName", self.part_name.as_deref())?;
        check::positive_opt("partCost", self.part_cost)?;
        check::positive_opt("labourCost", self.labour_cost)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceRequestItemListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub service_request_id: Option<i32>,
}

impl ServiceRequestItemListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<service_request_item::Entity> {
        let mut q = service_request_item::Entity::find();
        if let Some(v) = self.service_request_id {
            q = q.filter(service_request_item::Column::ServiceRequestId.eq(v));
        }
        q.order_by_desc(service_request_item::Column::CreatedAt)
    }
}

pub async fn list_items(
    db: &DatabaseConnection,
    query: &ServiceRequestItemListQuery,
) -> Result<Page<ServiceRequestItem>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn get_item(db: &DatabaseConnection, id: i32) -> Result<ServiceRequestItem, ServiceError> {
    service_request_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service request item"))
}

/// Costs are validated before anything touches the database.
pub async fn create_item(
    db: &DatabaseConnection,
    input: CreateServiceRequestItemInput,
) -> Result<ServiceRequestItem, ServiceError> {
    input.validate()?;
    let now = crate::now();
    let am = service_request_item::ActiveModel {
        service_request_id: Set(input.service_request_id),
        asset_id: Set(input.asset_id),
        part_name: Set(input.part_name),
        part_cost: Set(input.part_cost),
        labour_cost: Set(input.labour_cost),
        defect_description: Set(check::blank_to_none(input.defect_description)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_item(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateServiceRequestItemInput,
) -> Result<ServiceRequestItem, ServiceError> {
    input.validate()?;
    let mut am = get_item(db, id).await?.into_active_model();
    if let Some(v) = input.service_request_id { am.service_request_id = Set(v); }
    if let Some(v) = input.asset_id { am.asset_id = Set(v); }
    if let Some(v) = input.part_name { am.part_name = Set(v); }
    if let Some(v) = input.part_cost { am.part_cost = Set(v); }
    if let Some(v) = input.labour_cost { am.labour_cost = Set(v); }
    if let Some(v) = input.defect_description { am.defect_description = Set(check::blank_to_none(Some(v))); }
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn delete_item(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_request_item::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service request item"));
    }
    Ok(())
}

pub async fn list_by_service_request(
    db: &DatabaseConnection,
    service_request_id: i32,
) -> Result<Vec<ServiceRequestItem>, ServiceError> {
    Ok(service_request_item::Entity::find()
        .filter(service_request_item::Column::ServiceRequestId.eq(service_request_id))
        .order_by_desc(service_request_item::Column::CreatedAt)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::service_request_service::{self, CreateServiceRequestInput};
    use crate::test_support::{get_db, unique};
    use chrono::Utc;
    use models::enums::WarrantyStatus;

    fn item(service_request_id: i32, part_cost: f64) -> CreateServiceRequestItemInput {
        CreateServiceRequestItemInput {
            service_request_id,
            asset_id: "A-77".into(),
            part_name: "Compressor relay".into(),
            part_cost,
            labour_cost: 40.0,
            defect_description: Some("burnt contacts".into()),
        }
    }

    #[tokio::test]
    async fn negative_part_cost_fails_before_persistence() {
        let db = DatabaseConnection::Disconnected;
        let err = create_item(&db, item(1, -10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "\"partCost\" must be a positive number"));
    }

    #[test]
    fn zero_labour_cost_is_not_positive() {
        let mut i = item(1, 5.0);
        i.labour_cost = 0.0;
        assert!(matches!(i.validate(), Err(ServiceError::Validation(ref m)) if m.contains("labourCost")));
        let upd = UpdateServiceRequestItemInput { part_cost: Some(-0.01), ..Default::default() };
        assert!(upd.validate().is_err());
    }

    #[tokio::test]
    async fn items_follow_their_request() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let req = service_request_service::create_service_request(
            &db,
            CreateServiceRequestInput {
                asset_id: unique("asset"),
                technician_name: "T".into(),
                service_supplier_name: "S".into(),
                warranty_status: WarrantyStatus::Void,
                service_status: None,
                approver_name: None,
                service_date: Utc::now().into(),
                service_type: None,
                service_description: None,
            },
        )
        .await?;

        let a = create_item(&db, item(req.service_request_id, 120.0)).await?;
        let b = create_item(&db, item(req.service_request_id, 15.5)).await?;
        assert_eq!(a.total_cost(), 160.0);

        let updated = update_item(
            &db,
            b.service_request_item_id,
            UpdateServiceRequestItemInput { labour_cost: Some(10.0), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.labour_cost, 10.0);
        assert_eq!(updated.part_cost, 15.5);

        let page = list_items(
            &db,
            &ServiceRequestItemListQuery { service_request_id: Some(req.service_request_id), ..Default::default() },
        )
        .await?;
        assert_eq!(page.info.total, 2);
        assert_eq!(list_by_service_request(&db, req.service_request_id).await?.len(), 2);

        let orphan = create_item(&db, item(i32::MAX, 1.0)).await.unwrap_err();
        assert!(matches!(orphan, ServiceError::ForeignKey(_)));

        service_request_service::delete_service_request(&db, req.service_request_id).await?;
        assert!(matches!(get_item(&db, a.service_request_item_id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
