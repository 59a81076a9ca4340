//! Notification lead-time preferences keyed by consumer or supplier id.
//!
//! Both kinds share one shape; PUT creates the row when it does not exist.

use models::validation as check;
use models::{consumer_preference, supplier_preference, ConsumerPreference, SupplierPreference};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, Set};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PreferenceInput {
    /// defaults to 30 on create
    #[serde(default)]
    pub notification_days: Option<i32>,
}

impl PreferenceInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(d) = self.notification_days {
            check::non_negative_int("notificationDays", d)?;
        }
        Ok(())
    }
}

/// Result of an upsert; `created` is false when an existing row was updated.
#[derive(Debug, Clone)]
pub struct Upserted<T> {
    pub record: T,
    pub created: bool,
}

pub async fn get_consumer_preference(
    db: &DatabaseConnection,
    consumer_id: &str,
) -> Result<ConsumerPreference, ServiceError> {
    consumer_preference::Entity::find()
        .filter(consumer_preference::Column::ConsumerId.eq(consumer_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Consumer preference"))
}

async fn find_consumer(db: &DatabaseConnection, consumer_id: &str) -> Result<Option<ConsumerPreference>, ServiceError> {
    Ok(consumer_preference::Entity::find()
        .filter(consumer_preference::Column::ConsumerId.eq(consumer_id))
        .one(db)
        .await?)
}

async fn update_consumer(
    db: &DatabaseConnection,
    row: ConsumerPreference,
    input: &PreferenceInput,
) -> Result<ConsumerPreference, ServiceError> {
    let mut am = row.into_active_model();
    if let Some(d) = input.notification_days { am.notification_days = Set(d); }
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn upsert_consumer_preference(
    db: &DatabaseConnection,
    consumer_id: &str,
    input: PreferenceInput,
) -> Result<Upserted<ConsumerPreference>, ServiceError> {
    check::non_empty("consumerId", consumer_id)?;
    input.validate()?;
    if let Some(row) = find_consumer(db, consumer_id).await? {
        return Ok(Upserted { record: update_consumer(db, row, &input).await?, created: false });
    }
    let now = crate::now();
    let am = consumer_preference::ActiveModel {
        consumer_id: Set(consumer_id.to_string()),
        notification_days: Set(input
            .notification_days
            .unwrap_or(consumer_preference::DEFAULT_NOTIFICATION_DAYS)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    match am.insert(db).await.map_err(ServiceError::from) {
        Ok(record) => Ok(Upserted { record, created: true }),
        // a concurrent PUT created the row first
        Err(ServiceError::Duplicate(_)) => {
            let row = find_consumer(db, consumer_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Consumer preference"))?;
            Ok(Upserted { record: update_consumer(db, row, &input).await?, created: false })
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_consumer_preference(db: &DatabaseConnection, consumer_id: &str) -> Result<(), ServiceError> {
    let res = consumer_preference::Entity::delete_many()
        .filter(consumer_preference::Column::ConsumerId.eq(consumer_id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Consumer preference"));
    }
    Ok(())
}

pub async fn get_supplier_preference(
    db: &DatabaseConnection,
    supplier_id: &str,
) -> Result<SupplierPreference, ServiceError> {
    supplier_preference::Entity::find()
        .filter(supplier_preference::Column::SupplierId.eq(supplier_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Supplier preference"))
}

async fn find_supplier(db: &DatabaseConnection, supplier_id: &str) -> Result<Option<SupplierPreference>, ServiceError> {
    Ok(supplier_preference::Entity::find()
        .filter(supplier_preference::Column::SupplierId.eq(supplier_id))
        .one(db)
        .await?)
}

async fn update_supplier(
    db: &DatabaseConnection,
    row: SupplierPreference,
    input: &PreferenceInput,
) -> Result<SupplierPreference, ServiceError> {
    let mut am = row.into_active_model();
    if let Some(d) = input.notification_days { am.notification_days = Set(d); }
    am.updated_at = Set(crate::now());
    Ok(am.update(db).await?)
}

pub async fn upsert_supplier_preference(
    db: &DatabaseConnection,
    supplier_id: &str,
    input: PreferenceInput,
) -> Result<Upserted<SupplierPreference>, ServiceError> {
    check::non_empty("supplierId", supplier_id)?;
    input.validate()?;
    if let Some(row) = find_supplier(db, supplier_id).await? {
        return Ok(Upserted { record: update_supplier(db, row, &input).await?, created: false });
    }
    let now = crate::now();
    let am = supplier_preference::ActiveModel {
        supplier_id: Set(supplier_id.to_string()),
        notification_days: Set(input
            .notification_days
            .unwrap_or(supplier_preference::DEFAULT_NOTIFICATION_DAYS)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    match am.insert(db).await.map_err(ServiceError::from) {
        Ok(record) => Ok(Upserted { record, created: true }),
        // a concurrent PUT created the row first
        Err(ServiceError::Duplicate(_)) => {
            let row = find_supplier(db, supplier_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Supplier preference"))?;
            Ok(Upserted { record: update_supplier(db, row, &input).await?, created: false })
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_supplier_preference(db: &DatabaseConnection, supplier_id: &str) -> Result<(), ServiceError> {
    let res = supplier_preference::Entity::delete_many()
        .filter(supplier_preference::Column::SupplierId.eq(supplier_id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Supplier preference"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[test]
    fn negative_days_rejected() {
        let err = PreferenceInput { notification_days: Some(-5) }.validate().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("notificationDays")));
        assert!(PreferenceInput { notification_days: Some(0) }.validate().is_ok());
    }

    #[tokio::test]
    async fn consumer_upsert_creates_then_updates() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let consumer = unique("consumer");

        let first = upsert_consumer_preference(&db, &consumer, PreferenceInput::default()).await?;
        assert!(first.created);
        assert_eq!(first.record.notification_days, 30);

        let second =
            upsert_consumer_preference(&db, &consumer, PreferenceInput { notification_days: Some(7) }).await?;
        assert!(!second.created);
        assert_eq!(second.record.preference_id, first.record.preference_id);
        assert_eq!(get_consumer_preference(&db, &consumer).await?.notification_days, 7);

        delete_consumer_preference(&db, &consumer).await?;
        assert!(matches!(get_consumer_preference(&db, &consumer).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_consumer_preference(&db, &consumer).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_first_puts_create_one_row() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let consumer = unique("consumer");

        let (a, b) = tokio::join!(
            upsert_consumer_preference(&db, &consumer, PreferenceInput { notification_days: Some(5) }),
            upsert_consumer_preference(&db, &consumer, PreferenceInput { notification_days: Some(5) }),
        );
        let (a, b) = (a?, b?);
        assert_eq!(a.record.preference_id, b.record.preference_id);
        assert!(a.created || b.created);
        assert_eq!(get_consumer_preference(&db, &consumer).await?.notification_days, 5);

        delete_consumer_preference(&db, &consumer).await?;
        Ok(())
    }

    #[tokio::test]
    async fn supplier_preference_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let supplier = unique("supplier");
        let created =
            upsert_supplier_preference(&db, &supplier, PreferenceInput { notification_days: Some(60) }).await?;
        assert!(created.created);
        assert_eq!(get_supplier_preference(&db, &supplier).await?.notification_days, 60);
        delete_supplier_preference(&db, &supplier).await?;
        Ok(())
    }
}
