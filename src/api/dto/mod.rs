//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `webhook` - Inbound service-hook payload (documentation shape)
//! - `health` - Health check responses
//! - `error` - Common error response DTOs

mod error;
mod health;
mod webhook;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use webhook::{DetailedMessage, ServiceHookPayload};
