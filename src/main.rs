//! # Rawat — PM rotation scheduler
//!
//! Resolves the 4-week preventive-maintenance rotation for the civil day,
//! sends the assignments over WhatsApp every morning, and serves the HTTP
//! API for queries, manual dispatch, and group configuration.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rawat_channels::WaGatewayClient;
use rawat_core::config::RawatConfig;
use rawat_dispatch::{DailyTrigger, DelayPolicy, Dispatcher, NotificationSender};
use rawat_gateway::{AppState, SqliteStore};
use rawat_roster::AssignmentResolver;

#[derive(Parser)]
#[command(
    name = "rawat",
    version,
    about = "PM rotation scheduler with WhatsApp dispatch"
)]
struct Cli {
    /// Config file path (default: ~/.rawat/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the HTTP server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "rawat=debug,tower_http=debug"
    } else {
        "rawat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => RawatConfig::load_from(path)?,
        None => RawatConfig::load()?,
    };
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    // Storage: group config + message log
    let db_path = config.store.resolved_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = Arc::new(SqliteStore::open(&db_path)?);
    tracing::info!("Store initialized: {}", db_path.display());

    // Outbound WhatsApp gateway client
    let gateway = Arc::new(WaGatewayClient::new(&config.wa)?);
    tracing::info!("WhatsApp gateway: {}", config.wa.base_url);

    // The shared resolve → plan → send pipeline
    let delay = DelayPolicy::new(config.dispatch.delay_min_secs, config.dispatch.delay_max_secs);
    let sender = NotificationSender::new(gateway.clone(), store.clone(), delay);
    let dispatcher = Arc::new(Dispatcher::new(AssignmentResolver::builtin(), sender));

    // Daily trigger loop
    let trigger = DailyTrigger::from_config(&config.dispatch)?;
    let tz = trigger.timezone();
    let trigger_dispatcher = dispatcher.clone();
    tokio::spawn(async move {
        trigger.run(trigger_dispatcher).await;
    });

    // HTTP API
    let state = AppState {
        dispatcher,
        store,
        gateway,
        tz,
    };
    rawat_gateway::start(&config.gateway, state).await
}
