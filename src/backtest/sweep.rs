//! Side-by-side comparison of hand-picked weight presets

use crate::backtest::config::BacktestConfig;
use crate::backtest::evaluator::BacktestEvaluator;
use crate::error::ConfigError;
use crate::models::backtest::{Accuracy, PricePoint, SignalDistribution};
use crate::models::factor::FactorKind;
use crate::services::factor_provider::FactorProvider;
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPreset {
    pub name: String,
    pub weights: WeightConfig,
}

impl WeightPreset {
    pub fn new(name: impl Into<String>, weights: WeightConfig) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub name: String,
    pub weights: WeightConfig,
    pub overall: Accuracy,
    pub resolved_count: usize,
    pub incomplete_count: usize,
    pub signal_distribution: SignalDistribution,
}

/// Runs the same backtest once per preset. Rows come back in preset order;
/// choosing among them is left to the operator.
pub struct WeightSweep {
    presets: Vec<WeightPreset>,
    thresholds: ThresholdConfig,
    config: BacktestConfig,
}

impl WeightSweep {
    pub fn new(presets: Vec<WeightPreset>, thresholds: ThresholdConfig, config: BacktestConfig) -> Self {
        Self {
            presets,
            thresholds,
            config,
        }
    }

    /// Presets from the manual tuning pass.
    pub fn standard_presets() -> Result<Vec<WeightPreset>, ConfigError> {
        use FactorKind::*;
        let preset = |name: &str, rsi: f64, ma: f64, valuation: f64, momentum: f64, sentiment: f64| {
            WeightConfig::new([
                (Rsi, rsi),
                (MovingAverage, ma),
                (Valuation, valuation),
                (Momentum, momentum),
                (Sentiment, sentiment),
            ])
            .map(|weights| WeightPreset::new(name, weights))
        };
        Ok(vec![
            preset("Current", 0.10, 0.10, 0.35, 0.30, 0.15)?,
            preset("Valuation Focus", 0.15, 0.20, 0.35, 0.15, 0.15)?,
            preset("Technical Focus", 0.30, 0.30, 0.20, 0.20, 0.00)?,
            preset("Balanced", 0.20, 0.20, 0.20, 0.20, 0.20)?,
            preset("Momentum+RSI Focus", 0.35, 0.15, 0.20, 0.30, 0.00)?,
        ])
    }

    pub fn run<H>(&self, price_series: &[PricePoint], history: &H) -> Vec<SweepRow>
    where
        H: FactorProvider + ?Sized,
    {
        self.presets
            .iter()
            .map(|preset| {
                let evaluator = BacktestEvaluator::new(preset.weights.clone(), self.thresholds, self.config);
                let report = evaluator.run(price_series, history);
                info!(
                    preset = %preset.name,
                    accuracy = ?report.overall.accuracy,
                    "WeightSweep: preset evaluated"
                );
                SweepRow {
                    name: preset.name.clone(),
                    weights: report.config.weights,
                    overall: report.overall,
                    resolved_count: report.resolved_count,
                    incomplete_count: report.incomplete_count,
                    signal_distribution: report.signal_distribution,
                }
            })
            .collect()
    }
}
