//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file and environment configuration.
///
/// Files and environment variables are loaded without validation; the
/// merged result is validated once, so a CLI flag can fix a value a file
/// got wrong.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the way the CLI asks for it.
    ///
    /// `--config` selects single-file mode; `--env` picks the environment
    /// file in layered mode.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match &cli.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration and validate the result
    ///
    /// Precedence: `serve --log-level` > `--verbose`/`--quiet` > files/env.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }

                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }

                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Send { .. } => {}
        }
    }

    /// Get the base configuration (before CLI overrides)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::tests::{ENV_MUTEX, EnvGuard};
    use clap::Parser;
    use tempfile::TempDir;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.destination.webhook_url =
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=test".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = create_valid_base_config();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        let merged = merge(&["devops-relay"]).unwrap();
        assert_eq!(merged, create_valid_base_config());
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merge(&["devops-relay", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["devops-relay", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&["devops-relay", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_log_level_beats_verbose() {
        let merged = merge(&["devops-relay", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["devops-relay"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(result, Err(ConfigError::MissingRequired { .. })));
    }

    #[test]
    fn test_from_cli_with_config_file() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_relay_vars();

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("relay.toml");
        std::fs::write(
            &file,
            "[server]\nport = 6000\n\n[destination]\nwebhook_url = \"https://chat.example.com/hook?key=k\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "devops-relay",
            "--config",
            file.to_str().unwrap(),
            "serve",
            "--port",
            "7000",
        ])
        .unwrap();

        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.config().server.port, 6000);

        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.port, 7000);
        assert_eq!(merged.destination.webhook_url, "https://chat.example.com/hook?key=k");
    }
}
