//! Report assembly and tolerance re-evaluation

use crate::backtest::correctness::is_correct;
use crate::backtest::stats;
use crate::models::backtest::{Accuracy, BacktestCheckpoint, BacktestReport, ReportConfig, SignalDistribution};

impl BacktestReport {
    /// Report for a run that had too little data to place a single checkpoint.
    pub fn insufficient(config: ReportConfig) -> Self {
        Self {
            config,
            insufficient_data: true,
            checkpoints: Vec::new(),
            resolved_count: 0,
            incomplete_count: 0,
            overall: Accuracy::from_counts(0, 0),
            per_band: stats::per_band_accuracy(&[]),
            per_factor: Default::default(),
            score_distribution: None,
            signal_distribution: SignalDistribution::default(),
            horizon_volatility_pct: None,
            hold_tolerance_below_volatility: false,
        }
    }

    pub fn from_checkpoints(config: ReportConfig, checkpoints: Vec<BacktestCheckpoint>) -> Self {
        let resolved_count = checkpoints.iter().filter(|c| c.is_resolved()).count();
        let incomplete_count = checkpoints.iter().filter(|c| c.is_incomplete()).count();
        let horizon_volatility_pct = stats::horizon_volatility_pct(&checkpoints);
        let hold_tolerance_below_volatility = horizon_volatility_pct
            .map(|vol| config.hold_tolerance_pct < vol)
            .unwrap_or(false);

        Self {
            overall: stats::overall_accuracy(&checkpoints),
            per_band: stats::per_band_accuracy(&checkpoints),
            per_factor: stats::per_factor_accuracy(&checkpoints),
            score_distribution: stats::score_distribution(&checkpoints),
            signal_distribution: stats::signal_distribution(&checkpoints),
            horizon_volatility_pct,
            hold_tolerance_below_volatility,
            config,
            insufficient_data: false,
            checkpoints,
            resolved_count,
            incomplete_count,
        }
    }

    /// Overall accuracy had HOLD been judged with a different tolerance.
    ///
    /// Reuses the recorded realized changes; nothing is re-scored.
    pub fn accuracy_at_tolerance(&self, hold_tolerance_pct: f64) -> Accuracy {
        let outcomes: Vec<bool> = self
            .checkpoints
            .iter()
            .filter_map(|c| Some(is_correct(c.band()?, c.actual_change_pct()?, hold_tolerance_pct)))
            .collect();
        Accuracy::from_counts(outcomes.len(), outcomes.iter().filter(|c| **c).count())
    }

    pub fn tolerance_sensitivity(&self, tolerances: &[f64]) -> Vec<(f64, Accuracy)> {
        tolerances
            .iter()
            .map(|t| (*t, self.accuracy_at_tolerance(*t)))
            .collect()
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        if self.insufficient_data {
            return "insufficient data: no checkpoints evaluated".to_string();
        }
        let accuracy = match self.overall.accuracy {
            Some(acc) => format!("{:.1}%", acc * 100.0),
            None => "n/a".to_string(),
        };
        format!(
            "{} checkpoints ({} resolved, {} incomplete), accuracy {} at ±{}% hold tolerance; signals {} buy / {} hold / {} sell",
            self.checkpoints.len(),
            self.resolved_count,
            self.incomplete_count,
            accuracy,
            self.config.hold_tolerance_pct,
            self.signal_distribution.buy,
            self.signal_distribution.hold,
            self.signal_distribution.sell
        )
    }
}
