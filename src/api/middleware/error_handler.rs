//! Error handler for converting AppError to HTTP responses.
//!
//! Status mapping:
//! - BadRequest → 400 BAD_REQUEST
//! - MalformedPayload → 500 MALFORMED_PAYLOAD
//! - Delivery → 502 DELIVERY_FAILED
//! - Configuration → 500 CONFIGURATION_ERROR
//! - Internal → 500 INTERNAL_ERROR
//!
//! Source errors never reach the response body; server-side failures are
//! logged with their full chain instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_to_response_with_request_id(self, None)
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::MalformedPayload { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Delivery { .. } => StatusCode::BAD_GATEWAY,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
        AppError::Delivery { .. } => "DELIVERY_FAILED",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::BadRequest { message } | AppError::MalformedPayload { message } => {
            ErrorResponse::new(code, message)
        }
        AppError::Delivery { .. } => ErrorResponse::new(code, "Delivery to chat webhook failed"),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
                .with_details(json!({ "key": key }))
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

/// Build the JSON error response, attaching `request_id` when known.
pub fn error_to_response_with_request_id(error: AppError, request_id: Option<String>) -> Response {
    let status = error_to_status_code(&error);

    if status.is_server_error() {
        tracing::error!(error = ?error, code = error_to_code(&error), "Request failed");
    } else {
        tracing::debug!(error = %error, code = error_to_code(&error), "Request rejected");
    }

    let mut body = error_body(&error);
    if let Some(id) = request_id {
        body = body.with_request_id(&id);
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::DeliveryError;
    use http_body_util::BodyExt;
    use reqwest::StatusCode as ReqwestStatus;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_bad_request_status_code() {
        let error = AppError::BadRequest {
            message: "Invalid JSON".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&error), "BAD_REQUEST");
    }

    #[test]
    fn test_malformed_payload_status_code() {
        let error = AppError::MalformedPayload {
            message: "missing field `detailedMessage`".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_to_code(&error), "MALFORMED_PAYLOAD");
    }

    #[test]
    fn test_delivery_status_code() {
        let error: AppError = DeliveryError::Status {
            status: ReqwestStatus::FORBIDDEN,
            body: "invalid webhook url".to_string(),
        }
        .into();
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_GATEWAY);
        assert_eq!(error_to_code(&error), "DELIVERY_FAILED");
    }

    #[test]
    fn test_configuration_status_code() {
        let error = AppError::Configuration {
            key: "destination.webhook_url".to_string(),
            source: anyhow::anyhow!("Missing config"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_to_code(&error), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_internal_status_code() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("Unexpected error"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_to_code(&error), "INTERNAL_ERROR");
    }

    #[test]
    fn test_every_variant_has_a_distinct_code() {
        let errors = [
            AppError::BadRequest {
                message: "x".to_string(),
            },
            AppError::MalformedPayload {
                message: "x".to_string(),
            },
            DeliveryError::Status {
                status: ReqwestStatus::BAD_GATEWAY,
                body: String::new(),
            }
            .into(),
            AppError::Configuration {
                key: "destination".to_string(),
                source: anyhow::anyhow!("x"),
            },
            AppError::Internal {
                source: anyhow::anyhow!("x"),
            },
        ];

        let codes: Vec<_> = errors.iter().map(error_to_code).collect();
        assert_eq!(
            codes,
            [
                "BAD_REQUEST",
                "MALFORMED_PAYLOAD",
                "DELIVERY_FAILED",
                "CONFIGURATION_ERROR",
                "INTERNAL_ERROR"
            ]
        );
        let client_errors = errors
            .iter()
            .filter(|e| error_to_status_code(e).is_client_error())
            .count();
        assert_eq!(client_errors, 1);
    }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let error = AppError::MalformedPayload {
            message: "missing field `detailedMessage`".to_string(),
        };

        let response = error_to_response_with_request_id(error, Some("req-456".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_PAYLOAD");
        assert_eq!(json["message"], "missing field `detailedMessage`");
        assert_eq!(json["request_id"], "req-456");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("stack trace with secret key=abc"),
        };

        let json = body_json(error.into_response()).await;
        assert_eq!(json["message"], "An internal error occurred");
        assert!(!json.to_string().contains("secret"));
        assert!(json.get("request_id").is_none());
    }

    #[tokio::test]
    async fn test_delivery_error_hides_upstream_body() {
        let error: AppError = DeliveryError::Status {
            status: ReqwestStatus::BAD_REQUEST,
            body: "errcode 93000 key=abc".to_string(),
        }
        .into();

        let json = body_json(error.into_response()).await;
        assert!(!json.to_string().contains("key=abc"));
    }
}
