//! Descope management CLI
//!
//! Small operator tool over the management SDK:
//! 1. Loads `SdkConfig` (TOML file plus `DESCOPE_*` env overlay)
//! 2. Builds one pooled `api_client::Client` and the management façades
//! 3. Runs a single read-only command and prints the result as JSON

mod cli;
mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use api_client::{Client, ClientParams};
use clap::Parser;
use common::SdkConfig;
use management::{Management, ManagementParams};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs to stderr so stdout stays clean for command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    if cli.command.is_local() {
        let output = commands::run_local(&cli.command)?;
        return print_json(&output);
    }

    let config_path = SdkConfig::resolve_path(cli.config.as_deref());
    let config = if config_path.exists() {
        info!(path = %config_path.display(), "loading configuration");
        SdkConfig::load(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        info!(path = %config_path.display(), "no config file, using environment");
        SdkConfig::from_env().context("failed to load config from environment")?
    };

    info!(
        base_url = %config.client.base_url,
        timeout_secs = config.client.timeout_secs,
        max_connections = config.client.max_connections,
        headers = config.headers.len(),
        "configuration loaded"
    );

    let client = Client::new(ClientParams::from_config(&config)).context("building api client")?;
    let mgmt = Management::new(ManagementParams::from_config(&config), Arc::new(client));

    let output = commands::run(&mgmt, &cli.command).await?;
    print_json(&output)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering output")?;
    println!("{rendered}");
    Ok(())
}
