//! Service contracts: paginated search, CRUD and lookup by asset.

use common::pagination::Pagination;
use common::serde_helpers;
use models::enums::{ContractCoverageType, PaymentTerms, ServiceFrequency};
use models::validation as check;
use models::{service_contract, ServiceContract};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, like_pattern, Page};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateServiceContractInput {
    pub contract_number: String,
    pub contract_type_id: i32,
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub asset_id: String,
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub service_supplier_id: String,
    pub contract_name: String,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub start_date: DateTimeWithTimeZone,
    #[serde(deserialize_with = "serde_helpers::datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub end_date: DateTimeWithTimeZone,
    #[serde(default)]
    pub payment_terms: Option<PaymentTerms>,
    #[serde(default)]
    pub coverage_type: Option<ContractCoverageType>,
    #[serde(default)]
    pub includes: Option<String>,
    #[serde(default)]
    pub excludes: Option<String>,
    #[serde(default)]
    pub service_frequency: Option<ServiceFrequency>,
    #[serde(default)]
    pub preventive_maintenance_included: Option<bool>,
    #[serde(default)]
    pub breakdown_maintenance_included: Option<bool>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub status_id: Option<i32>,
}

impl CreateServiceContractInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("contractNumber", &self.contract_number)?;
        check::non_empty("assetId", &self.asset_id)?;
        check::non_empty("serviceSupplierId", &self.service_supplier_id)?;
        check::non_empty("contractName", &self.contract_name)?;
        check::date_order(&self.start_date, &self.end_date)?;
        Ok(())
    }

    fn into_active_model(self) -> service_contract::ActiveModel {
        let now = crate::now();
        service_contract::ActiveModel {
            contract_number: Set(self.contract_number.trim().to_string()),
            contract_type_id: Set(self.contract_type_id),
            asset_id: Set(self.asset_id),
            service_supplier_id: Set(self.service_supplier_id),
            contract_name: Set(self.contract_name),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            payment_terms: Set(self.payment_terms.unwrap_or_default()),
            coverage_type: Set(self.coverage_type.unwrap_or_default()),
            includes: Set(check::blank_to_none(self.includes)),
            excludes: Set(check::blank_to_none(self.excludes)),
            service_frequency: Set(self.service_frequency.unwrap_or_default()),
            preventive_maintenance_included: Set(self.preventive_maintenance_included.unwrap_or(false)),
            breakdown_maintenance_included: Set(self.breakdown_maintenance_included.unwrap_or(false)),
            auto_renewal: Set(self.auto_renewal.unwrap_or(false)),
            created_by: Set(check::blank_to_none(self.created_by)),
            updated_by: Set(None),
            status_id: Set(self.status_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateServiceContractInput {
    #[serde(default)]
    pub contract_number: Option<String>,
    #[serde(default)]
    pub contract_type_id: Option<i32>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub asset_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_string_or_number")]
    pub service_supplier_id: Option<String>,
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub start_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub payment_terms: Option<PaymentTerms>,
    #[serde(default)]
    pub coverage_type: Option<ContractCoverageType>,
    #[serde(default)]
    pub includes: Option<String>,
    #[serde(default)]
    pub excludes: Option<String>,
    #[serde(default)]
    pub service_frequency: Option<ServiceFrequency>,
    #[serde(default)]
    pub preventive_maintenance_included: Option<bool>,
    #[serde(default)]
    pub breakdown_maintenance_included: Option<bool>,
    #[serde(default)]
    pub auto_renewal: Option<bool>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub status_id: Option<i32>,
}

impl UpdateServiceContractInput {
    pub fn validate_against(&self, current: &ServiceContract) -> Result<(), ServiceError> {
        check::non_empty_opt("contractNumber", self.contract_number.as_deref())?;
        check::non_empty_opt("assetId", self.asset_id.as_deref())?;
        check::non_empty_opt("serviceSupplierId", self.service_supplier_id.as_deref())?;
        check::non_empty_opt("contractName", self.contract_name.as_deref())?;
        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        check::date_order(&start, &end)?;
        Ok(())
    }

    fn apply(self, am: &mut service_contract::ActiveModel) {
        if let Some(v) = self.contract_number { am.contract_number = Set(v.trim().to_string()); }
        if let Some(v) = self.contract_type_id { am.contract_type_id = Set(v); }
        if let Some(v) = self.asset_id { am.asset_id = Set(v); }
        if let Some(v) = self.service_supplier_id { am.service_supplier_id = Set(v); }
        if let Some(v) = self.contract_name { am.contract_name = Set(v); }
        if let Some(v) = self.start_date { am.start_date = Set(v); }
        if let Some(v) = self.end_date { am.end_date = Set(v); }
        if let Some(v) = self.payment_terms { am.payment_terms = Set(v); }
        if let Some(v) = self.coverage_type { am.coverage_type = Set(v); }
        if let Some(v) = self.includes { am.includes = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.excludes { am.excludes = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.service_frequency { am.service_frequency = Set(v); }
        if let Some(v) = self.preventive_maintenance_included { am.preventive_maintenance_included = Set(v); }
        if let Some(v) = self.breakdown_maintenance_included { am.breakdown_maintenance_included = Set(v); }
        if let Some(v) = self.auto_renewal { am.auto_renewal = Set(v); }
        if let Some(v) = self.updated_by { am.updated_by = Set(check::blank_to_none(Some(v))); }
        if let Some(v) = self.status_id { am.status_id = Set(Some(v)); }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceContractListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub contract_type_id: Option<i32>,
    pub service_supplier_id: Option<String>,
    pub status_id: Option<i32>,
    pub auto_renewal: Option<bool>,
    pub payment_terms: Option<PaymentTerms>,
    pub coverage_type: Option<ContractCoverageType>,
    /// case-insensitive match on contract number or name
    pub search: Option<String>,
}

impl ServiceContractListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<service_contract::Entity> {
        use service_contract::Column;
        let mut q = service_contract::Entity::find();
        if let Some(v) = self.contract_type_id {
            q = q.filter(Column::ContractTypeId.eq(v));
        }
        if let Some(v) = self.service_supplier_id.as_deref() {
            q = q.filter(Column::ServiceSupplierId.eq(v));
        }
        if let Some(v) = self.status_id {
            q = q.filter(Column::StatusId.eq(v));
        }
        if let Some(v) = self.auto_renewal {
            q = q.filter(Column::AutoRenewal.eq(v));
        }
        if let Some(v) = self.payment_terms {
            q = q.filter(Column::PaymentTerms.eq(v));
        }
        if let Some(v) = self.coverage_type {
            q = q.filter(Column::CoverageType.eq(v));
        }
        if let Some(term) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(term);
            q = q.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((service_contract::Entity, Column::ContractNumber))))
                            .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((service_contract::Entity, Column::ContractName))))
                            .like(pattern),
                    ),
            );
        }
        q.order_by_desc(Column::CreatedAt)
    }
}

pub async fn list_contracts(
    db: &DatabaseConnection,
    query: &ServiceContractListQuery,
) -> Result<Page<ServiceContract>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn get_contract(db: &DatabaseConnection, id: i32) -> Result<ServiceContract, ServiceError> {
    service_contract::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service contract"))
}

pub async fn create_contract(
    db: &DatabaseConnection,
    input: CreateServiceContractInput,
) -> Result<ServiceContract, ServiceError> {
    input.validate()?;
    let created = input.into_active_model().insert(db).await?;
    tracing::debug!(contract_id = created.contract_id, contract_number = %created.contract_number, "service contract created");
    Ok(created)
}

pub async fn update_contract(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateServiceContractInput,
) -> Result<ServiceContract, ServiceError> {
    let current = get_contract(db, id).await?;
    input.validate_against(&current)?;
    let mut am = current.into_active_model();
    input.apply(&mut am);
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn delete_contract(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_contract::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Service contract"));
    }
    Ok(())
}

pub async fn list_by_asset(db: &DatabaseConnection, asset_id: &str) -> Result<Vec<ServiceContract>, ServiceError> {
    Ok(service_contract::Entity::find()
        .filter(service_contract::Column::AssetId.eq(asset_id))
        .order_by_desc(service_contract::Column::CreatedAt)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contract_type_service::{self, CreateContractTypeInput};
    use crate::test_support::{get_db, unique};
    use chrono::{Duration, Utc};
    use models::enums::ContractTypeName;
    use sea_orm::{DbBackend, QueryTrait};

    fn input(contract_type_id: i32) -> CreateServiceContractInput {
        let now = Utc::now();
        CreateServiceContractInput {
            contract_number: unique("SC"),
            contract_type_id,
            asset_id: unique("asset"),
            service_supplier_id: "SUP-9".into(),
            contract_name: "Chiller annual maintenance".into(),
            start_date: now.into(),
            end_date: (now + Duration::days(365)).into(),
            payment_terms: None,
            coverage_type: None,
            includes: Some("filters".into()),
            excludes: Some("".into()),
            service_frequency: None,
            preventive_maintenance_included: Some(true),
            breakdown_maintenance_included: None,
            auto_renewal: None,
            created_by: Some("admin".into()),
            status_id: None,
        }
    }

    #[test]
    fn filters_render_enum_literals() {
        let q = ServiceContractListQuery {
            payment_terms: Some(PaymentTerms::HalfYearly),
            coverage_type: Some(ContractCoverageType::PartsOnly),
            search: Some("AMC".into()),
            ..Default::default()
        };
        let sql = q.select().build(DbBackend::Postgres).to_string();
        assert!(sql.contains("'HALF_YEARLY'"), "{sql}");
        assert!(sql.contains("'PARTS_ONLY'"), "{sql}");
        assert!(sql.contains(r#"LOWER("service_contract"."contract_name") LIKE '%amc%'"#), "{sql}");
    }

    #[test]
    fn query_string_parses_enum_filters() {
        let q: ServiceContractListQuery =
            serde_json::from_value(serde_json::json!({"paymentTerms": "ONE_TIME", "autoRenewal": true})).unwrap();
        assert_eq!(q.payment_terms, Some(PaymentTerms::OneTime));
        assert_eq!(q.auto_renewal, Some(true));
    }

    #[tokio::test]
    async fn contract_defaults_and_partial_update() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let ct = contract_type_service::create_contract_type(
            &db,
            CreateContractTypeInput {
                type_name: ContractTypeName::Amc,
                type_code: unique("amc"),
                description: None,
                contract_duration_months: None,
            },
        )
        .await?;

        let submitted = input(ct.contract_type_id);
        let c = create_contract(&db, submitted.clone()).await?;
        assert_eq!(c.payment_terms, PaymentTerms::Yearly);
        assert_eq!(c.coverage_type, ContractCoverageType::Comprehensive);
        assert_eq!(c.service_frequency, ServiceFrequency::AsRequired);
        assert!(c.preventive_maintenance_included);
        assert!(!c.breakdown_maintenance_included);
        assert_eq!(c.excludes, None);

        let u = update_contract(
            &db,
            c.contract_id,
            UpdateServiceContractInput {
                payment_terms: Some(PaymentTerms::Monthly),
                updated_by: Some("ops".into()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(u.payment_terms, PaymentTerms::Monthly);
        assert_eq!(u.updated_by.as_deref(), Some("ops"));
        assert_eq!(u.contract_name, submitted.contract_name);

        let page = list_contracts(
            &db,
            &ServiceContractListQuery { search: Some(submitted.contract_number.to_uppercase()), ..Default::default() },
        )
        .await?;
        assert_eq!(page.info.total, 1);
        assert_eq!(list_by_asset(&db, &submitted.asset_id).await?.len(), 1);

        let dup = create_contract(&db, submitted).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Duplicate(_)));

        delete_contract(&db, c.contract_id).await?;
        contract_type_service::delete_contract_type(&db, ct.contract_type_id).await?;
        Ok(())
    }
}
