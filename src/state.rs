//! Application state for Axum web framework.
//!
//! Everything here is built once at startup and shared read-only by all
//! request handlers.

use std::sync::Arc;

use reqwest::Url;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::build_http_client;
use crate::relay::{NotificationRelay, WeComWebhookSender};

/// Shared state handed to every handler through Axum's `State` extractor.
///
/// Cloning is cheap; the relay keeps its sender behind an `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub relay: NotificationRelay,
    /// Host of the configured chat webhook, reported by `/health`
    pub destination_host: Option<String>,
}

impl AppState {
    pub fn new(relay: NotificationRelay, destination_host: Option<String>) -> Self {
        Self {
            relay,
            destination_host,
        }
    }

    /// Wire the HTTP client, the WeCom sender and the relay from settings.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let url = Url::parse(&settings.destination.webhook_url).map_err(|e| {
            AppError::Configuration {
                key: "destination.webhook_url".to_string(),
                source: e.into(),
            }
        })?;
        let client =
            build_http_client(&settings.destination).map_err(|e| AppError::Configuration {
                key: "destination".to_string(),
                source: e.into(),
            })?;

        let destination_host = url.host_str().map(str::to_string);
        let sender = Arc::new(WeComWebhookSender::new(client, url));
        let relay = NotificationRelay::new(sender, settings.relay.reject_malformed_payload);

        Ok(Self::new(relay, destination_host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_extracts_host() {
        let mut settings = Settings::default();
        settings.destination.webhook_url =
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abc".to_string();

        let state = AppState::from_settings(&settings).expect("state should build");
        assert_eq!(state.destination_host.as_deref(), Some("qyapi.weixin.qq.com"));
    }

    #[test]
    fn test_from_settings_rejects_unparsable_url() {
        let mut settings = Settings::default();
        settings.destination.webhook_url = "not a url".to_string();

        match AppState::from_settings(&settings) {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "destination.webhook_url"),
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
