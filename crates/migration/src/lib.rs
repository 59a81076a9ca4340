//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_warranty_type;
mod m20240101_000002_create_warranties;
mod m20240101_000003_create_warranty_notification;
mod m20240101_000004_create_contract_type;
mod m20240101_000005_create_service_contract_status;
mod m20240101_000006_create_service_contract;
mod m20240101_000007_create_preferences;
mod m20240101_000008_create_service_request;
mod m20240101_000009_create_service_request_item;
mod m20240101_000010_create_service_history;
mod m20240101_000011_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_warranty_type::Migration),
            Box::new(m20240101_000002_create_warranties::Migration),
            Box::new(m20240101_000003_create_warranty_notification::Migration),
            Box::new(m20240101_000004_create_contract_type::Migration),
            Box::new(m20240101_000005_create_service_contract_status::Migration),
            Box::new(m20240101_000006_create_service_contract::Migration),
            Box::new(m20240101_000007_create_preferences::Migration),
            Box::new(m20240101_000008_create_service_request::Migration),
            Box::new(m20240101_000009_create_service_request_item::Migration),
            Box::new(m20240101_000010_create_service_history::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000011_add_indexes::Migration),
        ]
    }
}
