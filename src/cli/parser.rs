//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Environment as AppEnvironment;

/// Relay Azure DevOps service-hook notifications to a WeCom group robot
#[derive(Parser, Debug)]
#[command(name = "devops-relay")]
#[command(about = "Relay Azure DevOps service-hook notifications to a WeCom group robot")]
#[command(long_about = "
devops-relay accepts Azure DevOps service-hook notifications on
POST /api/Webhook/PostNotification, takes detailedMessage.markdown and posts it
to a WeCom (Enterprise WeChat) group robot as a markdown message.

The robot webhook URL contains its access key. Provide it through
DEVOPS_RELAY_DESTINATION__WEBHOOK_URL or an uncommitted config/local.toml.

EXAMPLES:
    # Start the relay with default configuration
    devops-relay serve

    # Listen on all interfaces on port 8080
    devops-relay serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    devops-relay --config /etc/devops-relay/relay.toml serve

    # Check configuration without starting the server
    devops-relay serve --dry-run

    # Post one message to the robot to check delivery
    devops-relay send --markdown \"**relay** test\"
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load exactly this TOML file instead of the layered `config/` directory.
    /// `DEVOPS_RELAY_*` environment variables still apply on top.
    ///
    /// Example: --config /etc/devops-relay/relay.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`.
    ///
    /// Available values: development (dev), staging (stage), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay server (default)
    ///
    /// Examples:
    ///   devops-relay serve                           # Start with defaults
    ///   devops-relay serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   devops-relay serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 5000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration files and the global --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration, print the (redacted) destination and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Post one markdown message to the configured robot
    ///
    /// Unlike the webhook endpoint, a failed delivery makes this command exit
    /// with a non-zero status.
    ///
    /// Example:
    ///   devops-relay send --markdown "Build **#42** failed"
    Send {
        /// Markdown text to send verbatim
        #[arg(short, long, value_name = "TEXT", value_parser = super::validation::validate_markdown)]
        markdown: String,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
            Environment::Test => AppEnvironment::Test,
        }
    }
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
        .to_string()
    }
}
