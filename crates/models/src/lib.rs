pub mod errors;
pub mod db;
pub mod enums;
pub mod validation;

pub mod warranty_type;
pub mod warranty;
pub mod warranty_notification;
pub mod contract_type;
pub mod service_contract_status;
pub mod service_contract;
pub mod consumer_preference;
pub mod supplier_preference;
pub mod service_request;
pub mod service_request_item;
pub mod service_history;

pub use errors::ModelError;

// Named aliases; API docs reference schemas by these names.
pub type WarrantyType = warranty_type::Model;
pub type Warranty = warranty::Model;
pub type WarrantyNotification = warranty_notification::Model;
pub type ContractType = contract_type::Model;
pub type ServiceContractStatus = service_contract_status::Model;
pub type ServiceContract = service_contract::Model;
pub type ConsumerPreference = consumer_preference::Model;
pub type SupplierPreference = supplier_preference::Model;
pub type ServiceRequest = service_request::Model;
pub type ServiceRequestItem = service_request_item::Model;
pub type ServiceHistory = service_history::Model;

#[cfg(test)]
mod tests;
