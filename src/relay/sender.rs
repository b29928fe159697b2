//! Chat sender abstraction and the WeCom robot implementation.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use super::message::OutboundChatMessage;

/// Outcome of a delivery the destination accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the destination
    pub status: u16,
    /// Raw response body
    pub body: String,
    pub duration_ms: u64,
}

/// Why a delivery did not succeed
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection, TLS or timeout failure; no response was received
    #[error("request to chat webhook failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The destination answered with a non-2xx status
    #[error("chat webhook answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Something that can post an [`OutboundChatMessage`] to a chat destination.
///
/// Implementations report every failure; deciding whether a failure matters
/// is left to the caller.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send(&self, message: &OutboundChatMessage) -> Result<DeliveryReceipt, DeliveryError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Posts to a WeCom (Enterprise WeChat) group robot webhook.
///
/// The URL carries the robot key, so `Debug` prints only the host.
#[derive(Clone)]
pub struct WeComWebhookSender {
    client: reqwest::Client,
    url: Url,
}

impl WeComWebhookSender {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl std::fmt::Debug for WeComWebhookSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeComWebhookSender")
            .field("host", &self.url.host_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatSender for WeComWebhookSender {
    async fn send(&self, message: &OutboundChatMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let start = Instant::now();

        // `.json` sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            return Err(DeliveryError::Status { status, body });
        }

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            body,
            duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "wecom"
    }
}
