//! Edge server for the humanize proxy

use clap::Parser;
use humanize_connector_fastapi::FastApiHumanizer;
use humanize_edge::EdgeProxy;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::Cli;
use config::ServerConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v when set
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    // Load configuration
    let config = match ServerConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(&args);

    info!("Forwarding humanize requests to {}", config.upstream_url);

    let humanizer = match FastApiHumanizer::new(config.connector_config()) {
        Ok(humanizer) => humanizer,
        Err(e) => {
            error!("Failed to create humanizer connector: {}", e);
            process::exit(1);
        }
    };

    let proxy = EdgeProxy::new(config.edge_config(), Arc::new(humanizer));

    if let Err(e) = proxy.serve().await {
        error!("Edge proxy stopped: {}", e);
        process::exit(1);
    }
}
