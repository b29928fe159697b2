//! Shape of the inbound service-hook notification.
//!
//! The handler reads the body as untyped JSON; these types only describe the
//! part of the payload that is consumed, for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Azure DevOps service-hook payload. Fields other than
/// `detailedMessage.markdown` are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "eventType": "build.complete",
    "detailedMessage": {
        "markdown": "Build [#42](https://dev.azure.com/org/project/_build/results?buildId=42) failed"
    }
}))]
pub struct ServiceHookPayload {
    pub detailed_message: DetailedMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailedMessage {
    /// Forwarded verbatim; `null` or blank means nothing is sent
    pub markdown: Option<String>,
}
