//! EPDash Daemon - e-paper time and weather dashboard
//!
//! This binary coordinates:
//! - Weather resolution (hourly cache with live refresh)
//! - Frame composition for the panel
//! - The minute-boundary display refresh loop

use anyhow::{Context, Result};
use chrono::Duration as ChronoDuration;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use epdash_display::{Panel, SimulatedPanel};
use epdash_weather::{CacheStore, OpenMeteoProvider, RefreshPolicy};

use epdash_daemon::{DashConfig, Scheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EPDash Daemon");

    // Load configuration
    let config = DashConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    // Without the flag, run exactly one cycle and exit
    let run_loop = std::env::args().any(|arg| arg == "--loop");

    // Wire up the weather side
    let store = CacheStore::new(&config.cache_path);
    let provider = OpenMeteoProvider::new(
        config.latitude,
        config.longitude,
        config.location.clone(),
        Duration::from_secs(config.http_timeout),
    )
    .context("Failed to build weather provider")?;
    let policy = RefreshPolicy::new(
        store,
        Box::new(provider),
        ChronoDuration::seconds(config.refresh_interval),
    );

    // Panel driver (simulator until real hardware is wired in)
    let panel = SimulatedPanel::new();
    let (width, height) = panel.dimensions();
    info!("Panel driver ready: {} ({}x{})", panel.name(), width, height);

    let mut scheduler = Scheduler::new(policy, Box::new(panel));

    if !run_loop {
        // Single-shot: a failed cycle is logged, exit code stays 0
        if let Err(e) = scheduler.run_once().await {
            error!("Display cycle failed: {:#}", e);
        }
        return Ok(());
    }

    info!("Daemon running - press Ctrl+C to stop");

    // Run until shutdown signal
    tokio::select! {
        result = scheduler.run() => {
            if let Err(e) = result {
                error!("Scheduler error: {:#}", e);
                return Err(e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("EPDash Daemon stopped");
    Ok(())
}

/// Resolve when the operator requests a stop
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install signal handler: {}", e);
        // Fall back to never resolving; the loop keeps running
        std::future::pending::<()>().await;
    }
}
