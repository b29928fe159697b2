//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{SendCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// No subcommand means `serve` without overrides.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            warn_on_privileged_port(&settings);
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => {
            warn_on_privileged_port(&settings);
            ServeCommandHandler::new(settings).execute(false).await
        }
        Some(Commands::Send { markdown }) => {
            SendCommandHandler::new(settings).execute(markdown).await?;
            Ok(())
        }
    }
}

fn warn_on_privileged_port(settings: &Settings) {
    let port = settings.server.port;
    if port < 1024 {
        tracing::warn!(
            port,
            host = %settings.server.host,
            "Binding to a port below 1024 usually requires elevated privileges"
        );
    }
}
