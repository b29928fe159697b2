//! Health check endpoint handlers.
//!
//! The relay has no storage, so health only reports whether a destination is
//! configured. No outbound probe is made; that would post a chat message.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::collections::HashMap;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Health check with component details
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let destination = check_destination(&state);
    let status = destination.status;

    let mut checks = HashMap::new();
    checks.insert("destination".to_string(), destination);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

/// Liveness probe endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn check_destination(state: &AppState) -> ComponentHealth {
    match &state.destination_host {
        Some(host) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("Configured: {}", host)),
        },
        None => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some("No destination configured".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::NotificationRelay;
    use crate::relay::service::tests::RecordingSender;
    use std::sync::Arc;

    fn state(host: Option<&str>) -> AppState {
        let relay = NotificationRelay::new(Arc::new(RecordingSender::default()), false);
        AppState::new(relay, host.map(str::to_string))
    }

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_destination_host() {
        let (code, Json(body)) = health_check(State(state(Some("qyapi.weixin.qq.com")))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, HealthStatus::Healthy);
        assert_eq!(body.version, crate::pkg_version());
        assert!(body.timestamp.parse::<jiff::Timestamp>().is_ok());
        assert_eq!(
            body.checks["destination"].message.as_deref(),
            Some("Configured: qyapi.weixin.qq.com")
        );
    }

    #[tokio::test]
    async fn test_health_unhealthy_without_destination() {
        let (code, Json(body)) = health_check(State(state(None))).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, HealthStatus::Unhealthy);
    }
}
