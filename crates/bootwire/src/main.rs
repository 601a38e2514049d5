//! bootwire - Entry Point
//!
//! Loads configuration, initialises logging, boots the graph and, with
//! `--wait`, keeps it alive until Ctrl-C. Shutdown callbacks run when `main`
//! returns, whether it succeeds or fails.

use anyhow::Context;
use bootwire::cli::Cli;
use bootwire_infrastructure::{Bootstrap, ProcessShutdown, init_logging, wait_for_signal};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.loader().load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    let _shutdown = ProcessShutdown::global().guard();

    let injector = Bootstrap::new(config.properties)
        .args(cli.args)
        .boot()
        .context("Bootstrap failed")?;
    info!(bindings = injector.len(), "Graph ready");

    if cli.wait {
        wait_for_signal().await?;
    }
    Ok(())
}
