//! Ladle Monitor entry point
//!
//! Loads configuration, seeds the fleet, starts the monitoring loop and
//! serves the REST API until Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use ladle_monitor::api::{create_app, DashboardState};
use ladle_monitor::config::MonitorConfig;
use ladle_monitor::LadleMonitor;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ladle-monitor")]
#[command(about = "Smart ladle tracking and health monitoring")]
#[command(version)]
struct CliArgs {
    /// Config file (default: $LADLE_CONFIG, then ./ladle_monitor.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long, env = "LADLE_ADDR", value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Fixed RNG seed for a reproducible simulation
    #[arg(long, env = "LADLE_SEED")]
    seed: Option<u64>,

    /// Tick period in milliseconds
    #[arg(long, env = "LADLE_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Serve the API without starting the loop; start it via POST /api/v1/simulation/start
    #[arg(long)]
    no_autostart: bool,
}

impl CliArgs {
    fn load_config(&self) -> Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => MonitorConfig::load().context("Failed to load configuration")?,
        };

        if let Some(addr) = &self.addr {
            config.server.addr.clone_from(addr);
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.monitor.interval_ms = interval_ms;
        }
        if self.no_autostart {
            config.monitor.autostart = false;
        }
        Ok(config)
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let config = args.load_config()?;

    info!(
        ladles = config.fleet.ladle_ids.len(),
        interval_ms = config.monitor.interval_ms,
        "Ladle Monitor starting"
    );

    let monitor = LadleMonitor::new(&config).context("Invalid monitor configuration")?;
    if config.monitor.autostart {
        monitor.start_loop().await;
    } else {
        info!("Autostart disabled; loop idle until POST /api/v1/simulation/start");
    }

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let server_addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address: {}", config.server.addr))?;
    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;
    info!("HTTP server listening on http://{}", server_addr);

    let app = create_app(DashboardState::new(monitor.clone()));
    let server_token = cancel_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { server_token.cancelled().await })
        .await
        .context("HTTP server error")?;

    monitor.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}
