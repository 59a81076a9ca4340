//! Warranty CRUD, lookups by asset and the expiring-soon query.

use chrono::{DateTime, Duration, Utc};
use common::pagination::Pagination;
use common::serde_helpers;
use models::validation as check;
use models::{warranty, warranty_notification, warranty_type, Warranty, WarrantyNotification, WarrantyType};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, like_pattern, Page};

pub const DEFAULT_EXPIRING_DAYS: i64 = 30;
/// Upper bound for `days`, a century.
pub const MAX_EXPIRING_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWarrantyInput {
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub asset_id: String,
    pub warranty_type_id: i32,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub warranty_supplier_id: Option<String>,
    #[serde(default)]
    pub warranty_number: Option<String>,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTimeWithTimeZone,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub end_date: DateTimeWithTimeZone,
    #[serde(default)]
    pub warranty_period: Option<i32>,
    #[serde(default)]
    pub coverage_type: Option<String>,
    #[serde(default)]
    pub coverage_description: Option<String>,
    #[serde(default)]
    pub terms_conditions: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub consumer_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub supplier_id: Option<String>,
}

impl CreateWarrantyInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("assetId", &self.asset_id)?;
        check::date_order(&self.start_date, &self.end_date)?;
        check::non_negative_opt("cost", self.cost)?;
        if let Some(p) = self.warranty_period {
            check::non_negative_int("warrantyPeriod", p)?;
        }
        Ok(())
    }

    fn into_active_model(self) -> warranty::ActiveModel {
        let now = crate::now();
        warranty::ActiveModel {
            asset_id: Set(self.asset_id),
            warranty_type_id: Set(self.warranty_type_id),
            warranty_supplier_id: Set(check::blank_to_none(self.warranty_supplier_id)),
            warranty_number: Set(check::blank_to_none(self.warranty_number)),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            warranty_period: Set(self.warranty_period),
            coverage_type: Set(check::blank_to_none(self.coverage_type)),
            coverage_description: Set(check::blank_to_none(self.coverage_description)),
            terms_conditions: Set(check::blank_to_none(self.terms_conditions)),
            cost: Set(self.cost),
            is_active: Set(self.is_active.unwrap_or(true)),
            auto_renewal: Set(self.auto_renewal.unwrap_or(false)),
            consumer_id: Set(check::blank_to_none(self.consumer_id)),
            supplier_id: Set(check::blank_to_none(self.supplier_id)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

/// Partial update; absent fields stay unchanged, empty strings clear optional text.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWarrantyInput {
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub warranty_type_id: Option<i32>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub warranty_supplier_id: Option<String>,
    #[serde(default)]
    pub warranty_number: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub warranty_period: Option<i32>,
    #[serde(default)]
    pub coverage_type: Option<String>,
    #[serde(default)]
    pub coverage_description: Option<String>,
    #[serde(default)]
    pub terms_conditions: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub consumer_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub supplier_id: Option<String>,
}

impl UpdateWarrantyInput {
    /// Checks that need the stored row (date order spans old and new values).
    pub fn validate_against(&self, current: &Warranty) -> Result<(), ServiceError> {
        check::non_empty_opt("assetId", self.asset_id.as_deref())?;
        check::non_negative_opt("cost", self.cost)?;
        if let Some(p) = self.warranty_period {
            check::non_negative_int("warrantyPeriod", p)?;
        }
        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        check::date_order(&start, &end)?;
        Ok(())
    }

    fn apply(self, am: &mut warranty::ActiveModel) {
        if let Some(v) = self.asset_id { am.asset_id = Set(v); }
        if let Some(v) = self.warranty_type_id { am.warranty_type_id = Set(v); }
        if let Some(v) = self.warranty_supplier_id { am.warranty_supplier_id = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.warranty_number { am.warranty_number = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.start_date { am.start_date = Set(v); }
        if let Some(v) = self.end_date { am.end_date = Set(v); }
        if let Some(v) = self.warranty_period { am.warranty_period = Set(Some(v)); }
        if let Some(v) = self.coverage_type { am.coverage_type = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.coverage_description { am.coverage_description = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.terms_conditions { am.terms_conditions = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.cost { am.cost = Set(Some(v)); }
        if let Some(v) = self.is_active { am.is_active = Set(v); }
        if let Some(v) = self.auto_renewal { am.auto_renewal = Set(v); }
        if let Some(v) = self.consumer_id { am.consumer_id = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.supplier_id { am.supplier_id = Set(check::blank_to_none(Some(v))); }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WarrantyListQuery {
    /// 1-based page, default 1
    pub page: Option<i64>,
    /// page size, default 10, max 100
    pub limit: Option<i64>,
    /// case-insensitive match on warranty number or coverage type
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub warranty_type_id: Option<i32>,
    pub consumer_id: Option<String>,
    pub supplier_id: Option<String>,
}

impl WarrantyListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<warranty::Entity> {
        let mut q = warranty::Entity::find();
        if let Some(term) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(term);
            q = q.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((warranty::Entity, warranty::Column::WarrantyNumber))))
                            .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((warranty::Entity, warranty::Column::CoverageType))))
                            .like(pattern),
                    ),
            );
        }
        if let Some(v) = self.is_active {
            q = q.filter(warranty::Column::IsActive.eq(v));
        }
        if let Some(v) = self.warranty_type_id {
            q = q.filter(warranty::Column::WarrantyTypeId.eq(v));
        }
        if let Some(v) = self.consumer_id.as_deref() {
            q = q.filter(warranty::Column::ConsumerId.eq(v));
        }
        if let Some(v) = self.supplier_id.as_deref() {
            q = q.filter(warranty::Column::SupplierId.eq(v));
        }
        q.order_by_desc(warranty::Column::CreatedAt)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExpiringQuery {
    /// look-ahead window in days, default 30
    pub days: Option<i64>,
    /// `false` drops warranties whose end date already passed
    pub include_expired: Option<bool>,
}

/// A warranty with its type and notifications.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyDetail {
    #[serde(flatten)]
    pub warranty: Warranty,
    pub warranty_type: Option<WarrantyType>,
    pub notifications: Vec<WarrantyNotification>,
}

/// `now + days`, rejecting negative or absurd windows.
pub fn expiry_threshold(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, ServiceError> {
    if !(0..=MAX_EXPIRING_DAYS).contains(&days) {
        return Err(ServiceError::validation(format!(
            "\"days\" must be between 0 and {MAX_EXPIRING_DAYS}"
        )));
    }
    Ok(now + Duration::days(days))
}

pub async fn list_warranties(
    db: &DatabaseConnection,
    query: &WarrantyListQuery,
) -> Result<Page<Warranty>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn find_warranty(db: &DatabaseConnection, id: i32) -> Result<Warranty, ServiceError> {
    warranty::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warranty"))
}

/// Warranty with its type and notifications embedded.
pub async fn get_warranty(db: &DatabaseConnection, id: i32) -> Result<WarrantyDetail, ServiceError> {
    let (warranty, warranty_type) = warranty::Entity::find_by_id(id)
        .find_also_related(warranty_type::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warranty"))?;
    let notifications = warranty
        .find_related(warranty_notification::Entity)
        .order_by_desc(warranty_notification::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(WarrantyDetail { warranty, warranty_type, notifications })
}

pub async fn create_warranty(db: &DatabaseConnection, input: CreateWarrantyInput) -> Result<Warranty, ServiceError> {
    input.validate()?;
    let created = input.into_active_model().insert(db).await?;
    tracing::debug!(warranty_id = created.warranty_id, asset_id = %created.asset_id, "warranty created");
    Ok(created)
}

pub async fn update_warranty(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateWarrantyInput,
) -> Result<Warranty, ServiceError> {
    let current = find_warranty(db, id).await?;
    input.validate_against(&current)?;
    let mut am = current.into_active_model();
    input.apply(&mut am);
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn delete_warranty(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = warranty::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Warranty"));
    }
    Ok(())
}

pub async fn list_by_asset(db: &DatabaseConnection, asset_id: &str) -> Result<Vec<Warranty>, ServiceError> {
    Ok(warranty::Entity::find()
        .filter(warranty::Column::AssetId.eq(asset_id))
        .order_by_desc(warranty::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Active warranties ending on or before `now + days`, soonest first.
pub async fn list_expiring(db: &DatabaseConnection, query: &ExpiringQuery) -> Result<Vec<Warranty>, ServiceError> {
    let now = Utc::now();
    let threshold = expiry_threshold(now, query.days.unwrap_or(DEFAULT_EXPIRING_DAYS))?;
    let threshold: DateTimeWithTimeZone = threshold.into();
    let mut q = warranty::Entity::find()
        .filter(warranty::Column::EndDate.lte(threshold))
        .filter(warranty::Column::IsActive.eq(true));
    if query.include_expired == Some(false) {
        let now: DateTimeWithTimeZone = now.into();
        q = q.filter(warranty::Column::EndDate.gte(now));
    }
    Ok(q.order_by_asc(warranty::Column::EndDate).all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::warranty_type_service::{self, CreateWarrantyTypeInput};
    use crate::test_support::{get_db, unique};
    use sea_orm::{DbBackend, QueryTrait};

    fn input(type_id: i32, end_in_days: i64) -> CreateWarrantyInput {
        let now = Utc::now();
        CreateWarrantyInput {
            asset_id: unique("asset"),
            warranty_type_id: type_id,
            warranty_supplier_id: Some("SUP-1".into()),
            warranty_number: Some(unique("WN")),
            start_date: (now - Duration::days(30)).into(),
            end_date: (now + Duration::days(end_in_days)).into(),
            warranty_period: Some(12),
            coverage_type: Some("COMPREHENSIVE".into()),
            coverage_description: Some("all parts".into()),
            terms_conditions: None,
            cost: Some(250.0),
            is_active: None,
            auto_renewal: None,
            consumer_id: Some("C-1".into()),
            supplier_id: None,
        }
    }

    #[test]
    fn threshold_adds_days_and_rejects_negative() {
        let now = Utc::now();
        assert_eq!(expiry_threshold(now, 30).unwrap(), now + Duration::days(30));
        assert_eq!(expiry_threshold(now, 0).unwrap(), now);
        assert!(matches!(expiry_threshold(now, -1), Err(ServiceError::Validation(_))));
        assert!(expiry_threshold(now, MAX_EXPIRING_DAYS + 1).is_err());
    }

    #[test]
    fn create_input_accepts_numeric_asset_and_plain_dates() {
        let parsed: CreateWarrantyInput = serde_json::from_value(serde_json::json!({
            "assetId": 1001,
            "warrantyTypeId": 1,
            "startDate": "2025-01-01",
            "endDate": "2026-01-01",
            "consumerId": 7
        }))
        .unwrap();
        assert_eq!(parsed.asset_id, "1001");
        assert_eq!(parsed.consumer_id.as_deref(), Some("7"));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn create_input_rejects_unknown_fields_and_bad_order() {
        let unknown = serde_json::from_value::<CreateWarrantyInput>(serde_json::json!({
            "assetId": "A", "warrantyTypeId": 1, "startDate": "2025-01-01",
            "endDate": "2026-01-01", "colour": "red"
        }));
        assert!(unknown.is_err());

        let mut i = input(1, 10);
        std::mem::swap(&mut i.start_date, &mut i.end_date);
        assert!(matches!(i.validate(), Err(ServiceError::Validation(_))));

        let mut i = input(1, 10);
        i.cost = Some(-1.0);
        assert!(i.validate().is_err());
    }

    #[test]
    fn search_filter_is_case_insensitive_on_both_columns() {
        let q = WarrantyListQuery { search: Some("Comp".into()), ..Default::default() };
        let sql = q.select().build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#"LOWER("warranties"."warranty_number") LIKE '%comp%'"#), "{sql}");
        assert!(sql.contains(r#"LOWER("warranties"."coverage_type") LIKE '%comp%'"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains(r#"ORDER BY "warranties"."created_at" DESC"#), "{sql}");
    }

    #[tokio::test]
    async fn list_with_page_past_the_end_is_empty() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let q = WarrantyListQuery { page: Some(i64::MAX), limit: Some(100), ..Default::default() };
        let page = list_warranties(&db, &q).await?;
        assert!(page.items.is_empty());
        assert!(!page.info.has_next_page);
        Ok(())
    }

    #[tokio::test]
    async fn warranty_crud_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let wt = warranty_type_service::create_warranty_type(
            &db,
            CreateWarrantyTypeInput { type_name: unique("Extended"), description: None },
        )
        .await?;

        let submitted = input(wt.warranty_type_id, 200);
        let created = create_warranty(&db, submitted.clone()).await?;
        assert!(created.is_active);
        assert!(!created.auto_renewal);

        let detail = get_warranty(&db, created.warranty_id).await?;
        let w = &detail.warranty;
        assert_eq!(w.asset_id, submitted.asset_id);
        assert_eq!(w.warranty_number, submitted.warranty_number);
        assert_eq!(w.coverage_type, submitted.coverage_type);
        assert_eq!(w.cost, submitted.cost);
        assert_eq!(w.start_date.timestamp(), submitted.start_date.timestamp());
        assert_eq!(w.end_date.timestamp(), submitted.end_date.timestamp());
        assert_eq!(detail.warranty_type.as_ref().map(|t| t.warranty_type_id), Some(wt.warranty_type_id));
        assert!(detail.notifications.is_empty());

        let updated = update_warranty(
            &db,
            created.warranty_id,
            UpdateWarrantyInput { cost: Some(300.0), coverage_description: Some(String::new()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.cost, Some(300.0));
        assert_eq!(updated.coverage_description, None);
        assert_eq!(updated.asset_id, submitted.asset_id);

        let by_asset = list_by_asset(&db, &submitted.asset_id).await?;
        assert_eq!(by_asset.len(), 1);

        delete_warranty(&db, created.warranty_id).await?;
        assert!(matches!(get_warranty(&db, created.warranty_id).await, Err(ServiceError::NotFound(_))));
        warranty_type_service::delete_warranty_type(&db, wt.warranty_type_id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn deleting_missing_warranty_is_not_found() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let err = delete_warranty(&db, i32::MAX).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Warranty not found"));
        let err = update_warranty(&db, i32::MAX, UpdateWarrantyInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn expiring_window_respects_days() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let wt = warranty_type_service::create_warranty_type(
            &db,
            CreateWarrantyTypeInput { type_name: unique("Std"), description: None },
        )
        .await?;
        let soon = create_warranty(&db, input(wt.warranty_type_id, 10)).await?;

        let within_30 = list_expiring(&db, &ExpiringQuery { days: Some(30), include_expired: None }).await?;
        assert!(within_30.iter().any(|w| w.warranty_id == soon.warranty_id));
        let within_5 = list_expiring(&db, &ExpiringQuery { days: Some(5), include_expired: None }).await?;
        assert!(!within_5.iter().any(|w| w.warranty_id == soon.warranty_id));
        assert!(within_30.windows(2).all(|p| p[0].end_date <= p[1].end_date));

        let mut lapsed = input(wt.warranty_type_id, -3);
        lapsed.start_date = (Utc::now() - Duration::days(400)).into();
        let lapsed = create_warranty(&db, lapsed).await?;
        let with_lapsed = list_expiring(&db, &ExpiringQuery::default()).await?;
        assert!(with_lapsed.iter().any(|w| w.warranty_id == lapsed.warranty_id));
        let upcoming = list_expiring(&db, &ExpiringQuery { days: None, include_expired: Some(false) }).await?;
        assert!(!upcoming.iter().any(|w| w.warranty_id == lapsed.warranty_id));

        let err = list_expiring(&db, &ExpiringQuery { days: Some(-1), include_expired: None }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        delete_warranty(&db, soon.warranty_id).await?;
        delete_warranty(&db, lapsed.warranty_id).await?;
        warranty_type_service::delete_warranty_type(&db, wt.warranty_type_id).await?;
        Ok(())
    }
}
