use models::validation as check;
use models::{service_contract_status, ServiceContractStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContractStatusInput {
    pub name: String,
}

pub async fn list_statuses(db: &DatabaseConnection) -> Result<Vec<ServiceContractStatus>, ServiceError> {
    Ok(service_contract_status::Entity::find()
        .order_by_asc(service_contract_status::Column::Name)
        .all(db)
        .await?)
}

pub async fn get_status(db: &DatabaseConnection, id: i32) -> Result<ServiceContractStatus, ServiceError> {
    service_contract_status::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Contract status"))
}

pub async fn create_status(
    db: &DatabaseConnection,
    input: ContractStatusInput,
) -> Result<ServiceContractStatus, ServiceError> {
    check::non_empty("name", &input.name)?;
    let now = crate::now();
    let am = service_contract_status::ActiveModel {
        name: Set(input.name.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_status(
    db: &DatabaseConnection,
    id: i32,
    input: ContractStatusInput,
) -> Result<ServiceContractStatus, ServiceError> {
    check::non_empty("name", &input.name)?;
    let mut am = get_status(db, id).await?.into_active_model();
    am.name = Set(input.name.trim().to_string());
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

/// Contracts pointing at the status keep existing with `statusId = null`.
pub async fn delete_status(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = service_contract_status::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Contract status"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn status_crud_and_unique_name() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let name = unique("Active");
        let s = create_status(&db, ContractStatusInput { name: name.clone() }).await?;
        let dup = create_status(&db, ContractStatusInput { name }).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Duplicate(_)));

        let renamed = unique("Suspended");
        let updated = update_status(&db, s.status_id, ContractStatusInput { name: renamed.clone() }).await?;
        assert_eq!(updated.name, renamed);
        assert!(updated.updated_at >= s.updated_at);

        delete_status(&db, s.status_id).await?;
        assert!(matches!(delete_status(&db, s.status_id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
