use std::sync::Arc;

use serde_json::Value;

use super::message::{OutboundChatMessage, extract_markdown};
use super::sender::{ChatSender, DeliveryError, DeliveryReceipt};
use crate::error::{AppError, AppResult};

/// What the relay did with an inbound notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Nothing to forward (empty body or blank markdown)
    NoContent,
    /// A forward was attempted; its result does not change this outcome
    Forwarded,
}

/// Turns service-hook notifications into chat messages.
///
/// Holds no per-request state; clones share the same sender.
#[derive(Clone)]
pub struct NotificationRelay {
    sender: Arc<dyn ChatSender>,
    reject_malformed_payload: bool,
}

impl NotificationRelay {
    pub fn new(sender: Arc<dyn ChatSender>, reject_malformed_payload: bool) -> Self {
        Self {
            sender,
            reject_malformed_payload,
        }
    }

    /// Handle one inbound payload. `None` means the request had no body or
    /// the body was JSON `null`.
    ///
    /// Only a payload without the `detailedMessage.markdown` shape is an error.
    /// Delivery failures are logged by [`Self::forward`] and never returned.
    pub async fn handle_notification(&self, body: Option<Value>) -> AppResult<RelayOutcome> {
        tracing::info!("Webhook received");

        let Some(body) = body else {
            tracing::error!("No content");
            return Ok(RelayOutcome::NoContent);
        };

        let markdown = extract_markdown(&body).map_err(|message| {
            tracing::warn!(reason = %message, "Malformed payload");
            self.malformed(message)
        })?;

        match markdown {
            Some(text) if !text.trim().is_empty() => {
                self.forward(text).await;
                Ok(RelayOutcome::Forwarded)
            }
            _ => {
                tracing::error!("No markdown content");
                Ok(RelayOutcome::NoContent)
            }
        }
    }

    /// Best-effort forward: one attempt, failures are logged and swallowed.
    pub async fn forward(&self, text: &str) {
        match self.deliver(text).await {
            Ok(receipt) => tracing::info!(
                sender = self.sender.name(),
                status = receipt.status,
                duration_ms = receipt.duration_ms,
                response = %receipt.body,
                "Message sent to chat webhook"
            ),
            Err(e) => tracing::error!(
                sender = self.sender.name(),
                error = %e,
                "Failed to send message to chat webhook"
            ),
        }
    }

    /// Send `text` once and report the result to the caller.
    pub async fn deliver(&self, text: &str) -> Result<DeliveryReceipt, DeliveryError> {
        let message = OutboundChatMessage::markdown(text);
        self.sender.send(&message).await
    }

    fn malformed(&self, message: String) -> AppError {
        if self.reject_malformed_payload {
            AppError::BadRequest { message }
        } else {
            AppError::MalformedPayload { message }
        }
    }
}

impl std::fmt::Debug for NotificationRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRelay")
            .field("sender", &self.sender.name())
            .field("reject_malformed_payload", &self.reject_malformed_payload)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every message and answers with a fixed result
    #[derive(Default)]
    pub(crate) struct RecordingSender {
        pub sent: Mutex<Vec<OutboundChatMessage>>,
        pub fail_with: Option<StatusCode>,
    }

    impl RecordingSender {
        pub(crate) fn failing(status: StatusCode) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_with: Some(status),
            }
        }

        pub(crate) fn sent(&self) -> Vec<OutboundChatMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatSender for RecordingSender {
        async fn send(&self, message: &OutboundChatMessage) -> Result<DeliveryReceipt, DeliveryError> {
            self.sent.lock().unwrap().push(message.clone());
            match self.fail_with {
                Some(status) => Err(DeliveryError::Status {
                    status,
                    body: "rejected".to_string(),
                }),
                None => Ok(DeliveryReceipt {
                    status: 200,
                    body: r#"{"errcode":0,"errmsg":"ok"}"#.to_string(),
                    duration_ms: 1,
                }),
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn relay_with(sender: Arc<RecordingSender>) -> NotificationRelay {
        NotificationRelay::new(sender, false)
    }

    #[tokio::test]
    async fn absent_body_is_no_content() {
        let sender = Arc::new(RecordingSender::default());
        let outcome = relay_with(sender.clone()).handle_notification(None).await.unwrap();

        assert_eq!(outcome, RelayOutcome::NoContent);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn blank_markdown_is_no_content() {
        let sender = Arc::new(RecordingSender::default());
        let relay = relay_with(sender.clone());

        for markdown in [json!(""), json!("   "), json!("\n\t "), Value::Null] {
            let body = json!({"detailedMessage": {"markdown": markdown}});
            let outcome = relay.handle_notification(Some(body)).await.unwrap();
            assert_eq!(outcome, RelayOutcome::NoContent);
        }
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn markdown_is_forwarded_verbatim() {
        let sender = Arc::new(RecordingSender::default());
        let body = json!({"detailedMessage": {"markdown": "  Build #42 failed\n"}});

        let outcome = relay_with(sender.clone())
            .handle_notification(Some(body))
            .await
            .unwrap();

        assert_eq!(outcome, RelayOutcome::Forwarded);
        assert_eq!(
            sender.sent(),
            vec![OutboundChatMessage::markdown("  Build #42 failed\n")]
        );
    }

    #[tokio::test]
    async fn same_payload_twice_sends_twice() {
        let sender = Arc::new(RecordingSender::default());
        let relay = relay_with(sender.clone());
        let body = json!({"detailedMessage": {"markdown": "deploy done"}});

        relay.handle_notification(Some(body.clone())).await.unwrap();
        relay.handle_notification(Some(body)).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }

    #[tokio::test]
    async fn delivery_failure_still_forwarded() {
        let sender = Arc::new(RecordingSender::failing(StatusCode::INTERNAL_SERVER_ERROR));
        let body = json!({"detailedMessage": {"markdown": "Build #42 failed"}});

        let outcome = relay_with(sender.clone())
            .handle_notification(Some(body))
            .await
            .unwrap();

        assert_eq!(outcome, RelayOutcome::Forwarded);
        assert_eq!(sender.sent().len(), 1);
    }

    #[tokio::test]
    async fn deliver_reports_failure() {
        let sender = Arc::new(RecordingSender::failing(StatusCode::NOT_FOUND));
        let result = relay_with(sender).deliver("x").await;
        assert!(matches!(
            result,
            Err(DeliveryError::Status { status: StatusCode::NOT_FOUND, .. })
        ));
    }

    #[tokio::test]
    async fn malformed_payload_is_server_error_by_default() {
        let sender = Arc::new(RecordingSender::default());
        let result = relay_with(sender.clone())
            .handle_notification(Some(json!({"foo": "bar"})))
            .await;

        assert!(matches!(result, Err(AppError::MalformedPayload { .. })));
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_can_be_rejected_as_bad_request() {
        let sender = Arc::new(RecordingSender::default());
        let relay = NotificationRelay::new(sender, true);

        let result = relay
            .handle_notification(Some(json!({"detailedMessage": {"markdown": 7}})))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
