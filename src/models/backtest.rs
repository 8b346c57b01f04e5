use crate::backtest::correctness::{is_correct, price_change_pct};
use crate::models::factor::{FactorKind, FactorSet};
use crate::models::recommendation::{Band, CompositeResult};
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Why a checkpoint was left out of the accuracy aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum IncompleteReason {
    HorizonBeyondData,
    FactorLookup(String),
    Scoring(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckpointStatus {
    Pending,
    Resolved {
        price_after_horizon: f64,
        resolved_at: DateTime<Utc>,
        actual_change_pct: f64,
        correct: bool,
    },
    Incomplete {
        reason: IncompleteReason,
    },
}

/// One historical instant at which the scorer was re-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestCheckpoint {
    pub timestamp: DateTime<Utc>,
    pub price_at_checkpoint: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeResult>,
    pub status: CheckpointStatus,
}

impl BacktestCheckpoint {
    pub fn pending(timestamp: DateTime<Utc>, price_at_checkpoint: f64) -> Self {
        Self {
            timestamp,
            price_at_checkpoint,
            factors: None,
            composite: None,
            status: CheckpointStatus::Pending,
        }
    }

    pub fn with_factors(mut self, factors: FactorSet) -> Self {
        self.factors = Some(factors);
        self
    }

    /// Attach the as-of factors and the score computed from them.
    pub fn scored(self, factors: FactorSet, composite: CompositeResult) -> Self {
        let mut checkpoint = self.with_factors(factors);
        checkpoint.composite = Some(composite);
        checkpoint
    }

    /// Finalize against the realized price once the horizon has elapsed.
    ///
    /// Only a pending, scored checkpoint can resolve; anything else is
    /// returned as incomplete.
    pub fn resolve(
        self,
        price_after_horizon: f64,
        resolved_at: DateTime<Utc>,
        hold_tolerance_pct: f64,
    ) -> Self {
        if !self.is_pending() {
            return self;
        }
        let Some(band) = self.band() else {
            return self.mark_incomplete(IncompleteReason::Scoring(
                "checkpoint was never scored".to_string(),
            ));
        };

        let actual_change_pct = price_change_pct(self.price_at_checkpoint, price_after_horizon);
        let correct = is_correct(band, actual_change_pct, hold_tolerance_pct);
        Self {
            status: CheckpointStatus::Resolved {
                price_after_horizon,
                resolved_at,
                actual_change_pct,
                correct,
            },
            ..self
        }
    }

    pub fn mark_incomplete(self, reason: IncompleteReason) -> Self {
        if !self.is_pending() {
            return self;
        }
        Self {
            status: CheckpointStatus::Incomplete { reason },
            ..self
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, CheckpointStatus::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, CheckpointStatus::Resolved { .. })
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self.status, CheckpointStatus::Incomplete { .. })
    }

    pub fn band(&self) -> Option<Band> {
        self.composite.as_ref().map(|c| c.recommendation)
    }

    pub fn score(&self) -> Option<f64> {
        self.composite.as_ref().map(|c| c.score)
    }

    pub fn actual_change_pct(&self) -> Option<f64> {
        match self.status {
            CheckpointStatus::Resolved {
                actual_change_pct, ..
            } => Some(actual_change_pct),
            _ => None,
        }
    }

    pub fn correct(&self) -> Option<bool> {
        match self.status {
            CheckpointStatus::Resolved { correct, .. } => Some(correct),
            _ => None,
        }
    }
}

/// Configuration a report was produced with, echoed so results are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub weights: WeightConfig,
    pub thresholds: ThresholdConfig,
    pub step_days: u32,
    pub horizon_days: u32,
    pub hold_tolerance_pct: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub total: usize,
    pub correct: usize,
    /// Fraction in [0, 1]; absent when `total` is zero
    pub accuracy: Option<f64>,
}

impl Accuracy {
    pub fn from_counts(total: usize, correct: usize) -> Self {
        let accuracy = if total == 0 {
            None
        } else {
            Some(correct as f64 / total as f64)
        };
        Self {
            total,
            correct,
            accuracy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorAccuracy {
    pub samples: usize,
    pub matches: usize,
    pub directional_accuracy: Option<f64>,
    /// Pearson correlation of factor value with realized change
    pub correlation: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDistribution {
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub config: ReportConfig,
    pub insufficient_data: bool,
    pub checkpoints: Vec<BacktestCheckpoint>,
    pub resolved_count: usize,
    pub incomplete_count: usize,
    pub overall: Accuracy,
    pub per_band: BTreeMap<Band, Accuracy>,
    pub per_factor: BTreeMap<FactorKind, FactorAccuracy>,
    pub score_distribution: Option<ScoreDistribution>,
    pub signal_distribution: SignalDistribution,
    /// Std of realized horizon changes, in percent
    pub horizon_volatility_pct: Option<f64>,
    pub hold_tolerance_below_volatility: bool,
}
