//! Response envelope returned by the node service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope around every API payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    /// Whether the call succeeded.
    pub success: bool,

    /// Payload (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// Response metadata.
    pub meta: ResponseMeta,
}

/// Error details.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Error code, e.g. `NODE_OPERATION_ERROR`.
    pub code: String,

    /// Human-readable message. For driver failures this is the ORA- message.
    pub message: String,

    /// Extra context such as the failing `itemIndex`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Response metadata.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Execution ID of the batch, when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,

    /// Response timestamp.
    pub timestamp: DateTime<Utc>,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Service that handled the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            execution_id: None,
            timestamp: Utc::now(),
            duration_ms: None,
            service: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ResponseMeta::default(),
        }
    }

    /// Creates a successful response tagged with the service name.
    pub fn ok_with_service(data: T, service: impl Into<String>) -> Self {
        Self::ok(data).with_service(service)
    }

    /// Sets the execution ID.
    pub fn with_execution_id(mut self, execution_id: impl Into<String>) -> Self {
        self.meta.execution_id = Some(execution_id.into());
        self
    }

    /// Sets the processing time.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.meta.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.meta.service = Some(service.into());
        self
    }
}

impl ApiResponse<()> {
    /// Creates an error response.
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
            meta: ResponseMeta::default(),
        }
    }

    /// Creates an error response with details.
    pub fn err_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        let mut response = Self::err(code, message);
        if let Some(error) = response.error.as_mut() {
            error.details = Some(details);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::err_with_details(
            "NODE_OPERATION_ERROR",
            "ORA-01017: invalid username/password; logon denied",
            serde_json::json!({ "itemIndex": 2 }),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["details"]["itemIndex"], 2);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_with_service_sets_meta() {
        let response = ApiResponse::ok_with_service(1, "node-service").with_duration(12);
        assert_eq!(response.meta.service.as_deref(), Some("node-service"));
        assert_eq!(response.meta.duration_ms, Some(12));
    }
}
