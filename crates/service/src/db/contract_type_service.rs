use models::enums::ContractTypeName;
use models::validation as check;
use models::{contract_type, ContractType};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateContractTypeInput {
    pub type_name: ContractTypeName,
    pub type_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contract_duration_months: Option<i32>,
}

impl CreateContractTypeInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("typeCode", &self.type_code)?;
        if let Some(m) = self.contract_duration_months {
            check::non_negative_int("contractDurationMonths", m)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateContractTypeInput {
    #[serde(default)]
    pub type_name: Option<ContractTypeName>,
    #[serde(default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contract_duration_months: Option<i32>,
}

pub async fn list_contract_types(db: &DatabaseConnection) -> Result<Vec<ContractType>, ServiceError> {
    Ok(contract_type::Entity::find()
        .order_by_asc(contract_type::Column::TypeCode)
        .all(db)
        .await?)
}

pub async fn get_contract_type(db: &DatabaseConnection, id: i32) -> Result<ContractType, ServiceError> {
    contract_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Contract type"))
}

pub async fn create_contract_type(
    db: &DatabaseConnection,
    input: CreateContractTypeInput,
) -> Result<ContractType, ServiceError> {
    input.validate()?;
    let am = contract_type::ActiveModel {
        type_name: Set(input.type_name),
        type_code: Set(input.type_code.trim().to_string()),
        description: Set(check::blank_to_none(input.description)),
        contract_duration_months: Set(input.contract_duration_months),
        created_at: Set(crate::now()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_contract_type(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateContractTypeInput,
) -> Result<ContractType, ServiceError> {
    check::non_empty_opt("typeCode", input.type_code.as_deref())?;
    if let Some(m) = input.contract_duration_months {
        check::non_negative_int("contractDurationMonths", m)?;
    }
    let mut am = get_contract_type(db, id).await?.into_active_model();
    if let Some(v) = input.type_name { am.type_name = Set(v); }
    if let Some(v) = input.type_code { am.type_code = Set(v.trim().to_string()); }
    if let Some(v) = input.description { am.description = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.contract_duration_months { am.contract_duration_months = Set(Some(v)); }
    Ok(am.update(db).await?)
}

pub async fn delete_contract_type(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = contract_type::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Contract type"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[test]
    fn type_name_must_be_known_literal() {
        let bad = serde_json::from_value::<CreateContractTypeInput>(serde_json::json!({
            "typeName": "WEEKLY_VISIT", "typeCode": "X"
        }));
        assert!(bad.is_err());
        let ok: CreateContractTypeInput = serde_json::from_value(serde_json::json!({
            "typeName": "ON_CALL", "typeCode": "OC-1", "contractDurationMonths": 12
        }))
        .unwrap();
        assert_eq!(ok.type_name, ContractTypeName::OnCall);
        assert!(ok.validate().is_ok());
    }

    #[tokio::test]
    async fn contract_type_crud() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let code = unique("AMC");
        let ct = create_contract_type(
            &db,
            CreateContractTypeInput {
                type_name: ContractTypeName::Amc,
                type_code: code.clone(),
                description: None,
                contract_duration_months: Some(12),
            },
        )
        .await?;
        assert_eq!(get_contract_type(&db, ct.contract_type_id).await?.type_code, code);

        let updated = update_contract_type(
            &db,
            ct.contract_type_id,
            UpdateContractTypeInput { type_name: Some(ContractTypeName::Cmc), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.type_name, ContractTypeName::Cmc);
        assert_eq!(updated.contract_duration_months, Some(12));

        delete_contract_type(&db, ct.contract_type_id).await?;
        assert!(matches!(get_contract_type(&db, ct.contract_type_id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
