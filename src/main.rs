//! orchestrator-gateway - HTTP front end of the provider orchestrator

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use provider_orchestrator::utils::logging::{self, LogFormat};
use provider_orchestrator::{Config, Gateway};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Command line interface
#[derive(Parser, Debug)]
#[command(name = "orchestrator-gateway")]
#[command(about = "Health-aware routing gateway for AI completion providers")]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "ORCHESTRATOR_CONFIG", default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Log output format (pretty or json)
    #[arg(long, env = "ORCHESTRATOR_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    info!(
        "Starting {} v{} ({})",
        provider_orchestrator::NAME,
        provider_orchestrator::VERSION,
        provider_orchestrator::build_info().git_hash
    );

    let config = Config::from_file(&cli.config)
        .await
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let gateway = Gateway::new(config).context("Failed to initialize gateway")?;

    gateway.run().await.context("Gateway stopped with an error")
}

#[tokio::main]
async fn main() -> ExitCode {
    // Variables from .env must be visible before clap reads its env fallbacks
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_format, &cli.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
