use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Message is client-facing, e.g. `"partCost" must be a positive number`.
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ModelError::Validation(msg.into())
    }
}
