//! Configuration management module for devops-relay
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `DEVOPS_RELAY_*` environment variables
//!
//! The webhook URL embeds the chat robot's access key, so it normally
//! arrives through `DEVOPS_RELAY_DESTINATION__WEBHOOK_URL`.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, DestinationConfig, FileSettings, LoggerSettings,
    RelayConfig, ServerConfig, Settings,
};
