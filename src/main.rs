use clap::Parser;
use devops_relay::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_logger_from_settings(&settings).map_err(|e| {
        eprintln!("Logger initialization error: {}", e);
        e
    })?;

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = ?e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
