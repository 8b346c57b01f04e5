//! Satsignal Advisor
//!
//! Periodically scores the latest factor snapshot and logs a recommendation.

use dotenvy::dotenv;
use satsignal::config::AdvisorSettings;
use satsignal::core::{AdvisorRuntime, RecommendationEngine, RuntimeConfig};
use satsignal::logging;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = satsignal::config::get_environment();
    info!("Starting Satsignal Advisor");
    info!(environment = %env, "Environment");

    let settings = AdvisorSettings::from_env()?;
    info!(
        weights = ?settings.weights.normalized(),
        thresholds = ?settings.thresholds,
        "Scoring configuration loaded"
    );

    let engine = RecommendationEngine::new(settings.weights, settings.thresholds);
    let runtime = AdvisorRuntime::new(
        RuntimeConfig {
            interval_seconds: settings.interval_seconds,
            snapshot_path: settings.snapshot_path,
        },
        engine,
    );
    let handle = runtime.start();

    info!("Advisor started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down advisor...");
    handle.abort();
    info!("Advisor stopped");

    Ok(())
}
