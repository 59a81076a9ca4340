//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Every operation returns `Result<_, ServiceError>`.

pub mod errors;
pub mod pagination;
pub mod db;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use pagination::Page;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Timestamp written to `created_at` / `updated_at`.
pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}
