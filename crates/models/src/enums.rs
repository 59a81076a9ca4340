//! String-backed enumerations stored in varchar columns.
//!
//! The stored value and the JSON representation are the same literal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NotificationType {
    #[sea_orm(string_value = "Expiry_Warning")]
    #[serde(rename = "Expiry_Warning")]
    ExpiryWarning,
    #[sea_orm(string_value = "Expired")]
    #[serde(rename = "Expired")]
    Expired,
    #[sea_orm(string_value = "Renewal_Due")]
    #[serde(rename = "Renewal_Due")]
    RenewalDue,
    #[sea_orm(string_value = "Claim_Update")]
    #[serde(rename = "Claim_Update")]
    ClaimUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractTypeName {
    #[sea_orm(string_value = "AMC")]
    Amc,
    #[sea_orm(string_value = "CMC")]
    Cmc,
    #[sea_orm(string_value = "ON_CALL")]
    OnCall,
    #[sea_orm(string_value = "BREAKDOWN_MAINTENANCE")]
    BreakdownMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTerms {
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "HALF_YEARLY")]
    HalfYearly,
    #[default]
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
    #[sea_orm(string_value = "ONE_TIME")]
    OneTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractCoverageType {
    #[default]
    #[sea_orm(string_value = "COMPREHENSIVE")]
    Comprehensive,
    #[sea_orm(string_value = "PARTS_ONLY")]
    PartsOnly,
    #[sea_orm(string_value = "LABOR_ONLY")]
    LaborOnly,
    #[sea_orm(string_value = "PREVENTIVE_ONLY")]
    PreventiveOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceFrequency {
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "HALF_YEARLY")]
    HalfYearly,
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
    #[default]
    #[sea_orm(string_value = "AS_REQUIRED")]
    AsRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarrantyStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "EXPIRED")]
    Expired,
    #[sea_orm(string_value = "VOID")]
    Void,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn json_literal_matches_stored_value() {
        for v in NotificationType::iter() {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(json.as_str().unwrap(), v.to_value());
        }
        for v in PaymentTerms::iter() {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(json.as_str().unwrap(), v.to_value());
        }
        for v in ContractTypeName::iter() {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(json.as_str().unwrap(), v.to_value());
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(PaymentTerms::default(), PaymentTerms::Yearly);
        assert_eq!(ContractCoverageType::default(), ContractCoverageType::Comprehensive);
        assert_eq!(ServiceFrequency::default(), ServiceFrequency::AsRequired);
    }

    #[test]
    fn unknown_literal_is_rejected() {
        assert!(serde_json::from_str::<WarrantyStatus>("\"active\"").is_err());
        assert!(serde_json::from_str::<NotificationType>("\"EXPIRY_WARNING\"").is_err());
        assert_eq!(
            serde_json::from_str::<NotificationType>("\"Expiry_Warning\"").unwrap(),
            NotificationType::ExpiryWarning
        );
    }
}
