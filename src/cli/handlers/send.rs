//! Send command handler
//!
//! Posts one markdown message to the configured robot and reports the result.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::relay::DeliveryReceipt;
use crate::state::AppState;

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Deliver `markdown` once.
    ///
    /// A non-2xx answer or a transport failure is returned as an error so the
    /// process exits non-zero.
    pub async fn execute(&self, markdown: &str) -> AppResult<DeliveryReceipt> {
        let state = AppState::from_settings(&self.config)?;

        tracing::info!(
            destination = %self.config.destination.redacted_url(),
            "Sending markdown message"
        );

        let receipt = state.relay.deliver(markdown).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to send message to chat webhook");
        })?;

        println!("✓ Delivered in {} ms (HTTP {})", receipt.duration_ms, receipt.status);
        if !receipt.body.is_empty() {
            println!("{}", receipt.body);
        }

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::relay::DeliveryError;
    use crate::relay::sender::tests::spawn_webhook;
    use reqwest::StatusCode;

    fn settings_for(url: &str) -> Settings {
        let mut config = Settings::default();
        config.destination.webhook_url = url.to_string();
        config
    }

    #[tokio::test]
    async fn test_send_delivers_envelope() {
        let (url, seen) = spawn_webhook(StatusCode::OK, r#"{"errcode":0,"errmsg":"ok"}"#).await;

        let receipt = SendCommandHandler::new(settings_for(url.as_str()))
            .execute("**relay** test")
            .await
            .unwrap();

        assert_eq!(receipt.status, 200);
        assert_eq!(receipt.body, r#"{"errcode":0,"errmsg":"ok"}"#);
        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].body,
            br#"{"msgtype":"markdown","markdown":{"content":"**relay** test"}}"#
        );
    }

    #[tokio::test]
    async fn test_send_reports_rejection() {
        let (url, _seen) = spawn_webhook(StatusCode::BAD_GATEWAY, "upstream down").await;

        let result = SendCommandHandler::new(settings_for(url.as_str()))
            .execute("hello")
            .await;

        match result {
            Err(AppError::Delivery {
                source: DeliveryError::Status { status, body },
            }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream down");
            }
            other => panic!("Expected delivery status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_without_destination_is_configuration_error() {
        let result = SendCommandHandler::new(Settings::default())
            .execute("hello")
            .await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
