use anyhow::Result;
use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

use crate::db::connect;
use crate::enums::NotificationType;
use crate::{warranty, warranty_notification, warranty_type};

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}

async fn insert_type(db: &DatabaseConnection) -> Result<warranty_type::Model> {
    let am = warranty_type::ActiveModel {
        type_name: Set(unique("type")),
        description: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

async fn insert_warranty(db: &DatabaseConnection, type_id: i32) -> Result<warranty::Model> {
    let now = Utc::now();
    let am = warranty::ActiveModel {
        asset_id: Set(unique("asset")),
        warranty_type_id: Set(type_id),
        warranty_supplier_id: Set(None),
        warranty_number: Set(None),
        start_date: Set(now.into()),
        end_date: Set((now + Duration::days(365)).into()),
        warranty_period: Set(Some(12)),
        coverage_type: Set(None),
        coverage_description: Set(None),
        terms_conditions: Set(None),
        cost: Set(Some(99.0)),
        is_active: Set(true),
        auto_renewal: Set(false),
        consumer_id: Set(None),
        supplier_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn warranty_loads_type_and_notifications() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let wt = insert_type(&db).await?;
    let w = insert_warranty(&db, wt.warranty_type_id).await?;
    let n = warranty_notification::ActiveModel {
        warranty_id: Set(w.warranty_id),
        notification_type: Set(NotificationType::ExpiryWarning),
        message: Set("expires soon".into()),
        recipient_email: Set(None),
        sent_date: Set(None),
        is_sent: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let (found, ty) = warranty::Entity::find_by_id(w.warranty_id)
        .find_also_related(warranty_type::Entity)
        .one(&db)
        .await?
        .expect("warranty exists");
    assert_eq!(found.asset_id, w.asset_id);
    assert_eq!(ty.map(|t| t.warranty_type_id), Some(wt.warranty_type_id));

    let notes = found.find_related(warranty_notification::Entity).all(&db).await?;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].notification_id, n.notification_id);

    warranty::Entity::delete_by_id(w.warranty_id).exec(&db).await?;
    let orphan = warranty_notification::Entity::find_by_id(n.notification_id).one(&db).await?;
    assert!(orphan.is_none(), "notifications cascade with their warranty");

    warranty_type::Entity::delete_by_id(wt.warranty_type_id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn warranty_type_in_use_cannot_be_deleted() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let wt = insert_type(&db).await?;
    let w = insert_warranty(&db, wt.warranty_type_id).await?;

    let err = warranty_type::Entity::delete_by_id(wt.warranty_type_id)
        .exec(&db)
        .await
        .expect_err("restricted by fk");
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))
    ));

    warranty::Entity::delete_by_id(w.warranty_id).exec(&db).await?;
    warranty_type::Entity::delete_by_id(wt.warranty_type_id).exec(&db).await?;
    Ok(())
}
