//! Configuration loader for devops-relay
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "DEVOPS_RELAY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "DEVOPS_RELAY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "DEVOPS_RELAY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Where file-based configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// `default.toml`, `{environment}.toml` and `local.toml` from a directory
    Layered(PathBuf),
    /// Exactly one file, no layering
    SingleFile(PathBuf),
}

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `DEVOPS_RELAY_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`DEVOPS_RELAY_CONFIG_DIR`)
    /// - Specific configuration file (`DEVOPS_RELAY_CONFIG_FILE`)
    /// - Application environment (`DEVOPS_RELAY_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `DEVOPS_RELAY_CONFIG_DIR` and
    /// `DEVOPS_RELAY_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        let source = match (config_dir, config_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::mutual_exclusivity(
                    "DEVOPS_RELAY_CONFIG_DIR and DEVOPS_RELAY_CONFIG_FILE cannot both be set. \
                     Use DEVOPS_RELAY_CONFIG_DIR for layered configuration or \
                     DEVOPS_RELAY_CONFIG_FILE for a single configuration file.",
                ));
            }
            (None, Some(file)) => ConfigSource::SingleFile(file),
            (Some(dir), None) => ConfigSource::Layered(dir),
            (None, None) => ConfigSource::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader that reads exactly one file (plus environment variables)
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ConfigSource::SingleFile(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the environment used to pick `{environment}.toml`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Files this loader consults, in precedence order (lowest first)
    pub fn files(&self) -> Vec<PathBuf> {
        match &self.source {
            ConfigSource::SingleFile(file) => vec![file.clone()],
            ConfigSource::Layered(dir) => vec![
                dir.join("default.toml"),
                dir.join(self.environment.config_file_name()),
                dir.join("local.toml"),
            ],
        }
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the single file or `default.toml` is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and deserialize without running [`Settings::validate`]
    ///
    /// CLI overrides are applied on top of this result and validated afterwards.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        // The first entry of `files()` is the required one in both modes
        for (index, path) in self.files().iter().enumerate() {
            builder = Self::add_file_source(builder, path, index == 0)?;
        }

        // DEVOPS_RELAY_SERVER__PORT -> server.port
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            source: ConfigSource::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
            environment: AppEnvironment::default(),
        })
    }
}
