use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use debris_defense::config::SimConfig;
use debris_defense::metrics::Metrics;
use debris_defense::runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Debris Defense Simulator v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = SimConfig::load_or_default();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: {} debris, viewport {}x{}, frame {}ms, seed {:?}",
        config.debris_count,
        config.viewport_width,
        config.viewport_height,
        config.frame_ms,
        config.seed
    );

    let metrics = Arc::new(Metrics::new());
    let mission = runner::build_mission(&config);

    // Shutdown signal handler
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    let summary = runner::run(mission, &config, metrics.clone(), shutdown).await;

    info!(
        "Run finished after {:.1}s: {} frames, {} classifications, {} notifications",
        summary.elapsed.as_secs_f32(),
        summary.frames,
        summary.classifications,
        summary.notifications
    );
    if let Some(report) = summary.last_report {
        info!(
            "Final proximity: {} in range, {} near, risk {}",
            report.in_range,
            report.near_count(),
            report.risk
        );
    }
    info!(
        "Distance traveled {:.2}, debris avoided {}, fuel {:.2}%",
        summary.dashboard.statistics.distance_traveled,
        summary.dashboard.statistics.debris_avoided,
        summary.dashboard.telemetry.spacecraft.fuel
    );

    if let Some(path) = &config.metrics_file {
        std::fs::write(path, metrics.to_prometheus())
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
        info!("Metrics written to {}", path.display());
    }

    info!("Simulator stopped");
    Ok(())
}
