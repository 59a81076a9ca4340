use common::pagination::Pagination;
use common::serde_helpers;
use models::enums::NotificationType;
use models::validation as check;
use models::{warranty_notification, WarrantyNotification};
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
pub struct CreateNotificationInput {
    pub warranty_id: i32,
    pub notification_type: NotificationType,
    pub message: String,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub sent_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub is_sent: Option<bool>,
}

impl CreateNotificationInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty("message", &self.message)?;
        if let Some(email) = self.recipient_email.as_deref().filter(|e| !e.trim().is_empty()) {
            check::email("recipientEmail", email)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNotificationInput {
    #[serde(default)]
    pub notification_type: Option<NotificationType>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_datetime")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub sent_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub is_sent: Option<bool>,
}

impl UpdateNotificationInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check::non_empty_opt("message", self.message.as_deref())?;
        if let Some(email) = self.recipient_email.as_deref().filter(|e| !e.trim().is_empty()) {
            check::email("recipientEmail", email)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub warranty_id: Option<i32>,
    pub is_sent: Option<bool>,
    pub notification_type: Option<NotificationType>,
}

impl NotificationListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page, self.limit)
    }

    fn select(&self) -> Select<warranty_notification::Entity> {
        let mut q = warranty_notification::Entity::find();
        if let Some(v) = self.warranty_id {
            q = q.filter(warranty_notification::Column::WarrantyId.eq(v));
        }
        if let Some(v) = self.is_sent {
            q = q.filter(warranty_notification::Column::IsSent.eq(v));
        }
        if let Some(v) = self.notification_type {
            q = q.filter(warranty_notification::Column::NotificationType.eq(v));
        }
        q.order_by_desc(warranty_notification::Column::CreatedAt)
    }
}

pub async fn list_notifications(
    db: &DatabaseConnection,
    query: &NotificationListQuery,
) -> Result<Page<WarrantyNotification>, ServiceError> {
    fetch_page(db, query.select(), query.pagination()).await
}

pub async fn get_notification(db: &DatabaseConnection, id: i32) -> Result<WarrantyNotification, ServiceError> {
    warranty_notification::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warranty notification"))
}

/// The referenced warranty must exist; the foreign key enforces it.
pub async fn create_notification(
    db: &DatabaseConnection,
    input: CreateNotificationInput,
) -> Result<WarrantyNotification, ServiceError> {
    input.validate()?;
    let am = warranty_notification::ActiveModel {
        warranty_id: Set(input.warranty_id),
        notification_type: Set(input.notification_type),
        message: Set(input.message),
        recipient_email: Set(check::blank_to_none(input.recipient_email)),
        sent_date: Set(input.sent_date),
        is_sent: Set(input.is_sent.unwrap_or(false)),
        created_at: Set(crate::now()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn update_notification(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateNotificationInput,
) -> Result<WarrantyNotification, ServiceError> {
    input.validate()?;
    let mut am = get_notification(db, id).await?.into_active_model();
    if let Some(v) = input.notification_type { am.notification_type = Set(v); }
    if let Some(v) = input.message { am.message = Set(v); }
    if let Some(v) = input.recipient_email { am.recipient_email = Set(check::blank_to_none(Some(v))); }
    if let Some(v) = input.sent_date { am.sent_date = Set(Some(v)); }
    if let Some(v) = input.is_sent { am.is_sent = Set(v); }
    Ok(am.update(db).await?)
}

pub async fn delete_notification(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = warranty_notification::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Warranty notification"));
    }
    Ok(())
}

pub async fn list_by_warranty(
    db: &DatabaseConnection,
    warranty_id: i32,
) -> Result<Vec<WarrantyNotification>, ServiceError> {
    Ok(warranty_notification::Entity::find()
        .filter(warranty_notification::Column::WarrantyId.eq(warranty_id))
        .order_by_desc(warranty_notification::Column::CreatedAt)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::warranty_service::{self, CreateWarrantyInput};
    use crate::db::warranty_type_service::{self, CreateWarrantyTypeInput};
    use crate::test_support::{get_db, unique};
    use chrono::{Duration, Utc};
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn rejects_bad_email_and_empty_message() {
        let mut i = CreateNotificationInput {
            warranty_id: 1,
            notification_type: NotificationType::Expired,
            message: "expired".into(),
            recipient_email: Some("not-an-email".into()),
            sent_date: None,
            is_sent: None,
        };
        assert!(matches!(i.validate(), Err(ServiceError::Validation(ref m)) if m.contains("recipientEmail")));
        i.recipient_email = Some("".into());
        assert!(i.validate().is_ok());
        i.message = " ".into();
        assert!(i.validate().is_err());
    }

    #[test]
    fn list_filters_compose() {
        let q = NotificationListQuery {
            warranty_id: Some(4),
            is_sent: Some(false),
            notification_type: Some(NotificationType::RenewalDue),
            ..Default::default()
        };
        let sql = q.select().build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""warranty_notification"."warranty_id" = 4"#), "{sql}");
        assert!(sql.contains(r#""warranty_notification"."is_sent" = FALSE"#), "{sql}");
        assert!(sql.contains("'Renewal_Due'"), "{sql}");
    }

    #[tokio::test]
    async fn notification_requires_existing_warranty() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let err = create_notification(
            &db,
            CreateNotificationInput {
                warranty_id: i32::MAX,
                notification_type: NotificationType::ClaimUpdate,
                message: "claim approved".into(),
                recipient_email: None,
                sent_date: None,
                is_sent: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::ForeignKey(_)));
        Ok(())
    }

    #[tokio::test]
    async fn notification_crud_for_warranty() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let wt = warranty_type_service::create_warranty_type(
            &db,
            CreateWarrantyTypeInput { type_name: unique("Notify"), description: None },
        )
        .await?;
        let now = Utc::now();
        let w = warranty_service::create_warranty(
            &db,
            CreateWarrantyInput {
                asset_id: unique("asset"),
                warranty_type_id: wt.warranty_type_id,
                warranty_supplier_id: None,
                warranty_number: None,
                start_date: now.into(),
                end_date: (now + Duration::days(20)).into(),
                warranty_period: None,
                coverage_type: None,
                coverage_description: None,
                terms_conditions: None,
                cost: None,
                is_active: None,
                auto_renewal: None,
                consumer_id: None,
                supplier_id: None,
            },
        )
        .await?;

        let n = create_notification(
            &db,
            CreateNotificationInput {
                warranty_id: w.warranty_id,
                notification_type: NotificationType::ExpiryWarning,
                message: "expires in 20 days".into(),
                recipient_email: Some("ops@example.com".into()),
                sent_date: None,
                is_sent: None,
            },
        )
        .await?;
        assert!(!n.is_sent);

        let sent = update_notification(
            &db,
            n.notification_id,
            UpdateNotificationInput { is_sent: Some(true), sent_date: Some(now.into()), ..Default::default() },
        )
        .await?;
        assert!(sent.is_sent);
        assert!(sent.sent_date.is_some());

        let page = list_notifications(
            &db,
            &NotificationListQuery { warranty_id: Some(w.warranty_id), is_sent: Some(true), ..Default::default() },
        )
        .await?;
        assert_eq!(page.info.total, 1);
        assert_eq!(list_by_warranty(&db, w.warranty_id).await?.len(), 1);

        delete_notification(&db, n.notification_id).await?;
        assert!(matches!(get_notification(&db, n.notification_id).await, Err(ServiceError::NotFound(_))));
        warranty_service::delete_warranty(&db, w.warranty_id).await?;
        warranty_type_service::delete_warranty_type(&db, wt.warranty_type_id).await?;
        Ok(())
    }
}
