//! Per-entity CRUD functions over a `DatabaseConnection`.

pub mod warranty_service;
pub mod warranty_type_service;
pub mod warranty_notification_service;
pub mod service_contract_service;
pub mod contract_type_service;
pub mod contract_status_service;
pub mod preference_service;
pub mod service_request_service;
pub mod service_request_item_service;
pub mod service_history_service;
