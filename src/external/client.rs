use std::time::Duration;

use crate::config::DestinationConfig;

/// Build the process-wide HTTP client used for outbound chat deliveries.
///
/// The client is created once at startup and handed to the sender, so every
/// request shares one connection pool. Timeouts come from `[destination]`;
/// a timeout surfaces as an ordinary `reqwest::Error` on the request.
pub fn build_http_client(config: &DestinationConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .user_agent(user_agent())
        .build()
}

fn user_agent() -> String {
    format!("devops-relay/{}", crate::pkg_version())
}
