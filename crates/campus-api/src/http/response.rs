//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// Error list (empty on success).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// HATEOAS-style links for discoverability.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta {
                request_id,
                timestamp: chrono::Utc::now().to_rfc3339(),
                response_time_ms,
            },
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }

    /// Create an error response carrying a single error detail.
    ///
    /// The HTTP status is derived from the machine-readable code when the
    /// envelope is converted into a response.
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            data: None,
            meta: ApiMeta {
                request_id: uuid::Uuid::now_v7().to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                response_time_ms: 0,
            },
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            }],
            links: HashMap::new(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.errors.is_empty() {
            StatusCode::OK
        } else {
            // Derive status code from the error code string
            match self.errors[0].code.as_str() {
                "STUDENT_NOT_FOUND" | "COURSE_NOT_FOUND" | "ENROLLMENT_NOT_FOUND" => {
                    StatusCode::NOT_FOUND
                }
                "NATIONAL_ID_CONFLICT" | "COURSE_CODE_CONFLICT" | "ALREADY_ENROLLED" => {
                    StatusCode::CONFLICT
                }
                "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };

        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(serde_json::json!({"ok": true}), "req-1".to_string(), 5)
            .with_link("self", "/api/v1/students");

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["data"]["ok"], true);
        assert_eq!(value["meta"]["request_id"], "req-1");
        assert_eq!(value["_links"]["self"], "/api/v1/students");
        assert!(value.get("errors").is_none(), "empty errors are omitted");
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = ApiResponse::<serde_json::Value>::error("STUDENT_NOT_FOUND", "Student not found");

        let value = serde_json::to_value(&resp).unwrap();
        assert!(value.get("data").is_none(), "missing data is omitted");
        assert_eq!(value["errors"][0]["code"], "STUDENT_NOT_FOUND");
        assert_eq!(value["errors"][0]["message"], "Student not found");
    }

    #[test]
    fn test_error_status_derived_from_code() {
        let not_found =
            ApiResponse::<serde_json::Value>::error("COURSE_NOT_FOUND", "x").into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict =
            ApiResponse::<serde_json::Value>::error("ALREADY_ENROLLED", "x").into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let validation =
            ApiResponse::<serde_json::Value>::error("VALIDATION_ERROR", "x").into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let internal =
            ApiResponse::<serde_json::Value>::error("INTERNAL_ERROR", "x").into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
