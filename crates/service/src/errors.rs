use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Unique constraint violated; carries the driver message.
    #[error("duplicate value: {0}")]
    Duplicate(String),
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::Duplicate(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::ForeignKey(msg),
            _ => {}
        }
        match err {
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            DbErr::RecordNotUpdated => Self::NotFound("Record not found".into()),
            other => Self::Db(other.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let e: ServiceError = DbErr::RecordNotFound("Warranty not found".into()).into();
        assert!(matches!(e, ServiceError::NotFound(ref m) if m == "Warranty not found"));
        let e: ServiceError = DbErr::RecordNotUpdated.into();
        assert!(matches!(e, ServiceError::NotFound(_)));
    }

    #[test]
    fn other_db_errors_are_opaque() {
        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(ref m) if m.contains("boom")));
    }

    #[test]
    fn model_validation_keeps_message() {
        let e: ServiceError = ModelError::validation("\"partCost\" must be a positive number").into();
        assert_eq!(e.to_string(), "\"partCost\" must be a positive number");
    }

    #[test]
    fn not_found_helper_formats_entity() {
        assert_eq!(ServiceError::not_found("Warranty").to_string(), "Warranty not found");
    }
}
