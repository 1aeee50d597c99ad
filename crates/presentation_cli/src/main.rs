//! pws-widget
//!
//! Refreshes the personal weather station widget data once, on a schedule,
//! or prints what is stored.

#![allow(clippy::print_stdout)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_cli::{App, Cli, Commands, ConsoleRenderer, EXIT_RETRY, log_filter_from_verbosity};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    let mut telemetry = config.telemetry.to_telemetry_config();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        telemetry = telemetry.with_filter(filter);
    }
    init_telemetry(&telemetry)?;

    let renderer = Arc::new(ConsoleRenderer::stdout(config.station.compact_label));
    let app = App::build(config, cli.ephemeral, renderer)?;

    match cli.command {
        Commands::Refresh { force, target } => {
            let outcome = app.refresh(force, target).await;
            if !outcome.is_success() {
                info!("Refresh should be retried later");
                return Ok(ExitCode::from(EXIT_RETRY));
            }
        },

        Commands::Daemon => {
            app.daemon(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl-C");
                }
            })
            .await?;
        },

        Commands::Show { json } => {
            println!("{}", app.show(json).await?);
        },

        Commands::Configure {
            api_key,
            station_id,
        } => {
            app.configure(&api_key, &station_id).await?;
            println!("Station {} configured", station_id.trim());
        },
    }

    Ok(ExitCode::SUCCESS)
}
