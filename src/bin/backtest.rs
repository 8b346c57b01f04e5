//! Satsignal Backtest
//!
//! Replays the composite scorer over a recorded price/factor history and
//! prints the report as JSON on stdout.

use dotenvy::dotenv;
use satsignal::backtest::{BacktestEvaluator, BacktestInput, WeightPreset, WeightSweep};
use satsignal::config::BacktestSettings;
use satsignal::logging;
use tracing::{info, warn};

const SENSITIVITY_TOLERANCES: [f64; 5] = [2.0, 3.0, 5.0, 7.0, 10.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let settings = BacktestSettings::from_env()?;
    info!(
        input = %settings.input_path.display(),
        step_days = settings.backtest.step_days(),
        horizon_days = settings.backtest.horizon_days(),
        hold_tolerance_pct = settings.backtest.hold_tolerance_pct(),
        "Starting Satsignal Backtest"
    );

    let raw = std::fs::read_to_string(&settings.input_path)
        .map_err(|e| format!("Failed to read {}: {}", settings.input_path.display(), e))?;
    let input = BacktestInput::from_json(&raw)?;
    let timeline = input.timeline()?;
    info!(
        prices = input.prices.len(),
        snapshots = timeline.len(),
        "Loaded backtest input"
    );

    let evaluator = BacktestEvaluator::new(
        settings.weights.clone(),
        settings.thresholds,
        settings.backtest,
    );
    let report = evaluator.run(&input.prices, &timeline);
    info!("{}", report.summary());

    if report.insufficient_data {
        warn!("Not enough history for a single checkpoint; nothing to evaluate");
    } else {
        for (tolerance, accuracy) in report.tolerance_sensitivity(&SENSITIVITY_TOLERANCES) {
            info!(
                hold_tolerance_pct = tolerance,
                accuracy = ?accuracy.accuracy,
                "Accuracy if HOLD allowed ±{}%",
                tolerance
            );
        }
    }

    if !input.presets.is_empty() {
        let mut presets = vec![WeightPreset::new("Configured", settings.weights)];
        presets.extend(input.presets.iter().cloned());
        let sweep = WeightSweep::new(presets, settings.thresholds, settings.backtest);
        for row in sweep.run(&input.prices, &timeline) {
            info!(
                preset = %row.name,
                accuracy = ?row.overall.accuracy,
                buy = row.signal_distribution.buy,
                hold = row.signal_distribution.hold,
                sell = row.signal_distribution.sell,
                "Preset comparison"
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
