use serde::Serialize;

use crate::pagination::PageInfo;

/// Success envelope shared by every resource route.
#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self { success: true, data: Some(data), pagination: None, message: None }
    }

    pub fn paginated(data: T, pagination: PageInfo) -> Self {
        Self { success: true, data: Some(data), pagination: Some(pagination), message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message, used by deletes.
    pub fn message(message: impl Into<String>) -> Self {
        Self { success: true, data: None, pagination: None, message: Some(message.into()) }
    }
}

/// Failure envelope.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageInfo, Pagination};

    #[test]
    fn data_envelope_omits_absent_fields() {
        let v = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["data"], serde_json::json!([1, 2]));
        assert!(v.get("pagination").is_none());
        assert!(v.get("message").is_none());
    }

    #[test]
    fn paginated_envelope_carries_metadata() {
        let info = PageInfo::new(Pagination { page: 1, limit: 10 }, 3);
        let v = serde_json::to_value(ApiResponse::paginated(vec!["a"], info)).unwrap();
        assert_eq!(v["pagination"]["total"], 3);
        assert_eq!(v["pagination"]["pages"], 1);
    }

    #[test]
    fn message_envelope_has_no_data() {
        let v = serde_json::to_value(ApiResponse::message("Warranty deleted successfully")).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["message"], "Warranty deleted successfully");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn error_body_shape() {
        let v = serde_json::to_value(ErrorBody::new("Route not found")).unwrap();
        assert_eq!(v, serde_json::json!({"success": false, "error": "Route not found"}));
    }
}
