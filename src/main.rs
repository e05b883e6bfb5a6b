//! servmon - backend service-health monitor daemon

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use servmon_rs::config::MonitorConfig;
use servmon_rs::core::aggregator::{Aggregator, Scheduler};
use servmon_rs::core::probe::ProbeRegistry;
use servmon_rs::core::probe::http::{BackendServicesProbe, BrokerProbe};

/// Backend service-health monitor
#[derive(Debug, Parser)]
#[command(name = "servmon", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "SERVMON_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single poll cycle, print the snapshot as JSON, and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => MonitorConfig::from_file(path)?,
        None => MonitorConfig::from_env()?,
    };

    let client = reqwest::Client::builder()
        .timeout(config.probe_timeout())
        .build()?;

    let mut registry = ProbeRegistry::new();
    registry.register(Arc::new(BrokerProbe::new(
        config.broker.name.clone(),
        config.broker.url.clone(),
        client.clone(),
    )))?;
    registry.register(Arc::new(BackendServicesProbe::new(
        config.backend.name.clone(),
        config.backend.summary_url.clone(),
        config.backend.detail_url.clone(),
        config.backend.type_prefix.clone(),
        client,
    )))?;

    let aggregator = Arc::new(Aggregator::with_timeout(registry, config.probe_timeout()));

    if cli.once {
        let snapshot = aggregator.run_cycle().await?;
        println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
        return Ok(());
    }

    aggregator.on_snapshot(|snapshot| {
        info!(
            entries = snapshot.entries.len(),
            errors = snapshot.error_count,
            "snapshot published"
        );
    });

    let scheduler = Scheduler::new(Arc::clone(&aggregator), config.poll_interval());
    let handle = scheduler.start();
    info!(
        interval_secs = config.poll_interval_secs,
        "monitor started"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    scheduler.stop();
    handle.abort();
    Ok(())
}
