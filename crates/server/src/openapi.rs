use models::enums::{
    ContractCoverageType, ContractTypeName, NotificationType, PaymentTerms, ServiceFrequency, WarrantyStatus,
};
use models::{
    ConsumerPreference, ContractType, ServiceContract, ServiceContractStatus, ServiceHistory, ServiceRequest,
    ServiceRequestItem, SupplierPreference, Warranty, WarrantyNotification, WarrantyType,
};
use service::db::contract_status_service::ContractStatusInput;
use service::db::contract_type_service::{CreateContractTypeInput, UpdateContractTypeInput};
use service::db::preference_service::PreferenceInput;
use service::db::service_contract_service::{CreateServiceContractInput, UpdateServiceContractInput};
use service::db::service_history_service::{CreateServiceHistoryInput, UpdateServiceHistoryInput};
use service::db::service_request_item_service::{CreateServiceRequestItemInput, UpdateServiceRequestItemInput};
use service::db::service_request_service::{CreateServiceRequestInput, UpdateServiceRequestInput};
use service::db::warranty_notification_service::{CreateNotificationInput, UpdateNotificationInput};
use service::db::warranty_service::{CreateWarrantyInput, UpdateWarrantyInput, WarrantyDetail};
use service::db::warranty_type_service::{CreateWarrantyTypeInput, UpdateWarrantyTypeInput};
use utoipa::OpenApi;

use crate::routes::health::{HealthChecks, HealthResponse, MemoryUsage, ProbeResponse};
use crate::routes::{
    contract_status, contract_type, health, preference, service_contract, service_history, service_request,
    service_request_item, warranty, warranty_notification, warranty_type,
};

/// Paths that are served outside the API prefix.
const UNPREFIXED: &[&str] = &["/health", "/ready", "/live"];

#[derive(OpenApi)]
#[openapi(
    info(title = "Warranty Service API", description = "Warranties, service contracts and service requests"),
    paths(
        health::health,
        health::ready,
        health::live,
        warranty::list,
        warranty::get_one,
        warranty::create,
        warranty::update,
        warranty::remove,
        warranty::by_asset,
        warranty::expiring,
        warranty_type::list,
        warranty_type::get_one,
        warranty_type::create,
        warranty_type::update,
        warranty_type::remove,
        warranty_notification::list,
        warranty_notification::get_one,
        warranty_notification::create,
        warranty_notification::update,
        warranty_notification::remove,
        warranty_notification::by_warranty,
        service_contract::list,
        service_contract::get_one,
        service_contract::create,
        service_contract::update,
        service_contract::remove,
        service_contract::by_asset,
        contract_type::list,
        contract_type::get_one,
        contract_type::create,
        contract_type::update,
        contract_type::remove,
        contract_status::list,
        contract_status::get_one,
        contract_status::create,
        contract_status::update,
        contract_status::remove,
        preference::get_consumer,
        preference::put_consumer,
        preference::delete_consumer,
        preference::get_supplier,
        preference::put_supplier,
        preference::delete_supplier,
        service_request::list,
        service_request::get_one,
        service_request::by_asset,
        service_request::create,
        service_request::update,
        service_request::remove,
        service_request_item::list,
        service_request_item::get_one,
        service_request_item::create,
        service_request_item::update,
        service_request_item::remove,
        service_request_item::by_service_request,
        service_history::list,
        service_history::get_one,
        service_history::by_asset,
        service_history::create,
        service_history::update,
        service_history::remove,
    ),
    components(
        schemas(
            HealthResponse, HealthChecks, MemoryUsage, ProbeResponse,
            Warranty, WarrantyDetail, WarrantyType, WarrantyNotification,
            ServiceContract, ContractType, ServiceContractStatus,
            ConsumerPreference, SupplierPreference,
            ServiceRequest, ServiceRequestItem, ServiceHistory,
            NotificationType, ContractTypeName, PaymentTerms, ContractCoverageType, ServiceFrequency, WarrantyStatus,
            CreateWarrantyInput, UpdateWarrantyInput,
            CreateWarrantyTypeInput, UpdateWarrantyTypeInput,
            CreateNotificationInput, UpdateNotificationInput,
            CreateServiceContractInput, UpdateServiceContractInput,
            CreateContractTypeInput, UpdateContractTypeInput,
            ContractStatusInput, PreferenceInput,
            CreateServiceRequestInput, UpdateServiceRequestInput,
            CreateServiceRequestItemInput, UpdateServiceRequestItemInput,
            CreateServiceHistoryInput, UpdateServiceHistoryInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "warranty"),
        (name = "warranty-type"),
        (name = "warranty-notification"),
        (name = "service-contract"),
        (name = "contract-type"),
        (name = "contract-status"),
        (name = "preference"),
        (name = "service-request"),
        (name = "service-request-item"),
        (name = "service-history")
    )
)]
pub struct ApiDoc;

/// The document with resource paths moved under the configured prefix.
pub fn openapi(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    let prefix = prefix.trim_end_matches('/');
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| {
            if UNPREFIXED.contains(&path.as_str()) {
                (path, item)
            } else {
                (format!("{prefix}{path}"), item)
            }
        })
        .collect();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths_carry_prefix_and_probes_do_not() {
        let doc = openapi("/api/v1");
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/live"));
        assert!(paths.contains_key("/api/v1/warranty"));
        assert!(paths.contains_key("/api/v1/warranty/{id}"));
        assert!(paths.contains_key("/api/v1/warranty/expiring"));
        assert!(paths.contains_key("/api/v1/preference/consumer/{consumerId}"));
        assert!(!paths.contains_key("/warranty"));
    }

    #[test]
    fn entity_schemas_use_resource_names() {
        let doc = openapi("/api/v1");
        let schemas = &doc.components.as_ref().expect("components").schemas;
        for name in ["Warranty", "WarrantyDetail", "ServiceRequestItem", "CreateWarrantyInput", "PaymentTerms"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
