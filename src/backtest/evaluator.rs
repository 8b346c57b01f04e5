//! Walk-forward backtest over historical checkpoints

use crate::backtest::config::BacktestConfig;
use crate::models::backtest::{
    BacktestCheckpoint, BacktestReport, IncompleteReason, PricePoint, ReportConfig,
};
use crate::services::factor_provider::{AsOf, FactorProvider};
use crate::signals::engine::CompositeScorer;
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

/// Re-runs the composite scorer at fixed steps through a price history and
/// judges each recommendation against the price one horizon later.
#[derive(Debug, Clone)]
pub struct BacktestEvaluator {
    weights: WeightConfig,
    thresholds: ThresholdConfig,
    config: BacktestConfig,
}

impl BacktestEvaluator {
    pub fn new(weights: WeightConfig, thresholds: ThresholdConfig, config: BacktestConfig) -> Self {
        Self {
            weights,
            thresholds,
            config,
        }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the backtest.
    ///
    /// Never fails: a series too short for one step plus one horizon yields
    /// an empty report flagged `insufficient_data`, and checkpoints whose
    /// factors cannot be looked up or scored are kept as incomplete.
    pub fn run<H>(&self, price_series: &[PricePoint], history: &H) -> BacktestReport
    where
        H: FactorProvider + ?Sized,
    {
        let series = prepare_series(price_series);
        let report_config = self.report_config();

        if !self.has_enough_data(&series) {
            warn!(
                points = series.len(),
                step_days = self.config.step_days(),
                horizon_days = self.config.horizon_days(),
                "Backtest: insufficient price history for one step plus one horizon"
            );
            return BacktestReport::insufficient(report_config);
        }

        let indices = self.checkpoint_indices(&series);
        info!(
            checkpoints = indices.len(),
            from = %series[0].timestamp,
            to = %series[series.len() - 1].timestamp,
            hold_tolerance_pct = self.config.hold_tolerance_pct(),
            "Backtest: starting run"
        );

        let checkpoints: Vec<BacktestCheckpoint> = indices
            .into_iter()
            .map(|idx| self.evaluate_checkpoint(&series, idx, history))
            .collect();

        let report = BacktestReport::from_checkpoints(report_config, checkpoints);
        info!(
            resolved = report.resolved_count,
            incomplete = report.incomplete_count,
            accuracy = ?report.overall.accuracy,
            "Backtest: run complete"
        );
        if report.hold_tolerance_below_volatility {
            warn!(
                hold_tolerance_pct = self.config.hold_tolerance_pct(),
                horizon_volatility_pct = ?report.horizon_volatility_pct,
                "Backtest: hold tolerance is tighter than realized horizon volatility; HOLD accuracy will read pessimistic"
            );
        }
        report
    }

    /// Score and resolve the checkpoint at `series[idx]`.
    fn evaluate_checkpoint<H>(&self, series: &[PricePoint], idx: usize, history: &H) -> BacktestCheckpoint
    where
        H: FactorProvider + ?Sized,
    {
        let point = series[idx];
        let checkpoint = BacktestCheckpoint::pending(point.timestamp, point.price);
        let as_of = AsOf::new(point.timestamp, series);

        let factors = match history.factors_as_of(&as_of) {
            Ok(factors) => factors,
            Err(e) => {
                warn!(timestamp = %point.timestamp, error = %e, "Backtest: factor lookup failed, checkpoint incomplete");
                return checkpoint.mark_incomplete(IncompleteReason::FactorLookup(e.message));
            }
        };

        let composite = match CompositeScorer::score(&factors, &self.weights, &self.thresholds) {
            Ok(composite) => composite,
            Err(e) => {
                warn!(timestamp = %point.timestamp, error = %e, "Backtest: scoring failed, checkpoint incomplete");
                return checkpoint
                    .with_factors(factors)
                    .mark_incomplete(IncompleteReason::Scoring(e.to_string()));
            }
        };

        let checkpoint = checkpoint.scored(factors, composite);
        let target = point.timestamp + Duration::days(i64::from(self.config.horizon_days()));
        match first_at_or_after(series, target) {
            Some(future) => {
                let resolved = checkpoint.resolve(future.price, future.timestamp, self.config.hold_tolerance_pct());
                debug!(
                    timestamp = %point.timestamp,
                    band = ?resolved.band(),
                    change_pct = ?resolved.actual_change_pct(),
                    correct = ?resolved.correct(),
                    "Backtest: checkpoint resolved"
                );
                resolved
            }
            None => {
                warn!(timestamp = %point.timestamp, "Backtest: horizon extends past available data");
                checkpoint.mark_incomplete(IncompleteReason::HorizonBeyondData)
            }
        }
    }

    fn has_enough_data(&self, series: &[PricePoint]) -> bool {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return false;
        };
        let needed = Duration::days(i64::from(self.config.step_days()) + i64::from(self.config.horizon_days()));
        last.timestamp - first.timestamp >= needed
    }

    /// Indices of checkpoint samples: the first sample, then the first sample
    /// at or after each previous checkpoint plus one step, for as long as a
    /// full horizon of data remains.
    fn checkpoint_indices(&self, series: &[PricePoint]) -> Vec<usize> {
        let mut indices = Vec::new();
        let Some(last) = series.last().map(|p| p.timestamp) else {
            return indices;
        };
        let step = Duration::days(i64::from(self.config.step_days()));
        let horizon = Duration::days(i64::from(self.config.horizon_days()));

        let mut idx = 0;
        while idx < series.len() {
            let timestamp = series[idx].timestamp;
            if timestamp + horizon > last {
                break;
            }
            indices.push(idx);
            let next = timestamp + step;
            idx += series[idx..].partition_point(|p| p.timestamp < next);
        }
        indices
    }

    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            weights: self.weights.normalized(),
            thresholds: self.thresholds,
            step_days: self.config.step_days(),
            horizon_days: self.config.horizon_days(),
            hold_tolerance_pct: self.config.hold_tolerance_pct(),
        }
    }
}

/// Sort by time and drop samples without a usable positive price.
fn prepare_series(price_series: &[PricePoint]) -> Vec<PricePoint> {
    let mut series: Vec<PricePoint> = price_series
        .iter()
        .filter(|p| p.price.is_finite() && p.price > 0.0)
        .copied()
        .collect();
    let dropped = price_series.len() - series.len();
    if dropped > 0 {
        warn!(dropped, "Backtest: ignoring price samples without a positive finite price");
    }
    series.sort_by_key(|p| p.timestamp);
    series
}

fn first_at_or_after(series: &[PricePoint], target: DateTime<Utc>) -> Option<PricePoint> {
    let idx = series.partition_point(|p| p.timestamp < target);
    series.get(idx).copied()
}
