use models::validation as check;
use models::{warranty_type, WarrantyType};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWarrantyTypeInput {
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWarrantyTypeInput {
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn list_warranty_types(db: &DatabaseConnection) -> Result<Vec<WarrantyType>, ServiceError> {
    Ok(warranty_type::Entity::find()
        .order_by_asc(warranty_type::Column::TypeName)
        .all(db)
        .await?)
}

pub async fn get_warranty_type(db: &DatabaseConnection, id: i32) -> Result<WarrantyType, ServiceError> {
    warranty_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warranty type"))
}

pub async fn create_warranty_type(
    db: &DatabaseConnection,
    input: CreateWarrantyTypeInput,
) -> Result<WarrantyType, ServiceError> {
    check::non_empty("typeName", &input.type_name)?;
    let am = warranty_type::ActiveModel {
        type_name: Set(input.type_name.trim().to_string()),
        description: Set(check::blank_to_none(input.description)),
        created_at: Set(crate::now()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_warranty_type(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateWarrantyTypeInput,
) -> Result<WarrantyType, ServiceError> {
    check::non_empty_opt("typeName", input.type_name.as_deref())?;
    let mut am = get_warranty_type(db, id).await?.into_active_model();
    if let Some(v) = input.type_name { am.type_name = Set(v.trim().to_string()); }
    if let Some(v) = input.description { am.description = Set(check::blank_to_none(Some(v))); }
    Ok(am.update(db).await?)
}

/// Fails with a foreign-key error while warranties still reference the type.
pub async fn delete_warranty_type(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = warranty_type::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Warranty type"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn warranty_type_crud_and_duplicate_name() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let name = unique("OnSite");
        let created = create_warranty_type(
            &db,
            CreateWarrantyTypeInput { type_name: name.clone(), description: Some("on-site repair".into()) },
        )
        .await?;
        assert_eq!(created.type_name, name);

        let dup = create_warranty_type(&db, CreateWarrantyTypeInput { type_name: name.clone(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(dup, ServiceError::Duplicate(_)));

        let updated = update_warranty_type(
            &db,
            created.warranty_type_id,
            UpdateWarrantyTypeInput { type_name: None, description: Some("".into()) },
        )
        .await?;
        assert_eq!(updated.description, None);
        assert_eq!(updated.type_name, name);

        assert!(list_warranty_types(&db).await?.iter().any(|t| t.warranty_type_id == created.warranty_type_id));
        delete_warranty_type(&db, created.warranty_type_id).await?;
        assert!(matches!(
            delete_warranty_type(&db, created.warranty_type_id).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn blank_type_name_is_rejected_before_insert() -> Result<(), anyhow::Error> {
        let db = sea_orm::DatabaseConnection::Disconnected;
        let err = create_warranty_type(&db, CreateWarrantyTypeInput { type_name: "  ".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("typeName")));
        Ok(())
    }
}
