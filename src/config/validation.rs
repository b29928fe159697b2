//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    DestinationConfig, FileSettings, LoggerSettings, ServerConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Body limit must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host address cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.body_limit == 0 {
            return Err(ConfigError::validation(
                "server.body_limit",
                "Body limit must be greater than 0 bytes.",
            ));
        }

        Ok(())
    }
}

impl DestinationConfig {
    /// Validate destination configuration
    ///
    /// # Validation Rules
    /// - Webhook URL is required and must be an absolute http(s) URL
    /// - Timeouts must be greater than 0
    /// - Connect timeout must not exceed the total timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_url.trim().is_empty() {
            return Err(ConfigError::missing(
                "destination.webhook_url",
                "set DEVOPS_RELAY_DESTINATION__WEBHOOK_URL or [destination] webhook_url",
            ));
        }

        let url = Url::parse(&self.webhook_url).map_err(|e| ConfigError::ValidationError {
            field: "destination.webhook_url".to_string(),
            message: format!("Invalid webhook URL: {}", e),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::ValidationError {
                field: "destination.webhook_url".to_string(),
                message: format!(
                    "Webhook URL must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::validation(
                "destination.timeout",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "destination.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout > self.timeout {
            return Err(ConfigError::ValidationError {
                field: "destination.connect_timeout".to_string(),
                message: format!(
                    "Connect timeout ({}) cannot exceed timeout ({}).",
                    self.connect_timeout, self.timeout
                ),
            });
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one of console or file output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()?;

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    ///
    /// The outbound timeout must be shorter than the inbound request timeout;
    /// otherwise a hanging destination turns into a 408 for the caller and
    /// the failed forward is never logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.destination.validate()?;
        self.logger.validate()?;

        if self.destination.timeout >= self.server.request_timeout {
            return Err(ConfigError::ValidationError {
                field: "destination.timeout".to_string(),
                message: format!(
                    "Destination timeout ({}s) must be shorter than server.request_timeout ({}s).",
                    self.destination.timeout, self.server.request_timeout
                ),
            });
        }

        Ok(())
    }
}
