use utoipa::OpenApi;

pub const WEBHOOK_TAG: &str = "Webhook";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevOps Relay",
        description = "Relays Azure DevOps service-hook notifications to a WeCom group robot",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::ServiceHookPayload,
        )
    ),
    tags(
        (name = WEBHOOK_TAG, description = "Inbound service-hook endpoint"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
