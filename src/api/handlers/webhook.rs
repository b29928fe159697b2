//! Service-hook webhook handler.
//!
//! `POST /api/Webhook/PostNotification` accepts an Azure DevOps service-hook
//! notification and relays its markdown to the chat robot.

use crate::api::doc::WEBHOOK_TAG;
use crate::api::dto::{ErrorResponse, ServiceHookPayload};
use crate::api::middleware::{RequestId, error_to_response_with_request_id};
use crate::error::AppError;
use crate::relay::RelayOutcome;
use crate::state::AppState;
use axum::{
    Extension,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates webhook routes.
pub fn webhook_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(post_notification))
}

/// Request body as untyped JSON, `None` when empty or `null`.
///
/// The content type is not checked; service hooks are not consistent about it.
#[derive(Debug)]
pub struct NotificationBody(pub Option<Value>);

impl<S> FromRequest<S> for NotificationBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Over-limit bodies keep axum's 413
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        // JSON whitespace only; a form feed is not one
        if bytes.iter().all(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')) {
            return Ok(Self(None));
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Null) => Ok(Self(None)),
            Ok(value) => Ok(Self(Some(value))),
            Err(e) => Err(AppError::BadRequest {
                message: format!("Request body is not valid JSON: {}", e),
            }
            .into_response()),
        }
    }
}

/// POST /api/Webhook/PostNotification - Relay a service-hook notification
///
/// Answers 200 whenever a forward was attempted, even if delivery failed.
#[utoipa::path(
    post,
    path = "/Webhook/PostNotification",
    tag = WEBHOOK_TAG,
    request_body(content = ServiceHookPayload, description = "Service-hook notification", content_type = "application/json"),
    responses(
        (status = 200, description = "Markdown forwarded (delivery is best-effort)"),
        (status = 204, description = "Empty body or blank markdown; nothing forwarded"),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 500, description = "Payload lacks detailedMessage.markdown", body = ErrorResponse)
    )
)]
async fn post_notification(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    NotificationBody(body): NotificationBody,
) -> Response {
    match state.relay.handle_notification(body).await {
        Ok(RelayOutcome::Forwarded) => StatusCode::OK.into_response(),
        Ok(RelayOutcome::NoContent) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_to_response_with_request_id(e, request_id.map(|Extension(id)| id.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Method;

    async fn extract(body: &'static str) -> Result<Option<Value>, StatusCode> {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::from(body))
            .unwrap();

        NotificationBody::from_request(request, &())
            .await
            .map(|NotificationBody(value)| value)
            .map_err(|response| response.status())
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        assert_eq!(extract("").await, Ok(None));
        assert_eq!(extract(" \n").await, Ok(None));
    }

    #[tokio::test]
    async fn test_form_feed_is_not_whitespace() {
        assert_eq!(extract("\x0C").await, Err(StatusCode::BAD_REQUEST));
        assert_eq!(extract("\r\n\t ").await, Ok(None));
    }

    #[tokio::test]
    async fn test_json_null_is_none() {
        assert_eq!(extract("null").await, Ok(None));
    }

    #[tokio::test]
    async fn test_object_is_kept() {
        let value = extract(r#"{"detailedMessage":{"markdown":"hi"}}"#).await.unwrap();
        assert_eq!(value.unwrap()["detailedMessage"]["markdown"], "hi");
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        assert_eq!(extract("{not json").await, Err(StatusCode::BAD_REQUEST));
    }
}
