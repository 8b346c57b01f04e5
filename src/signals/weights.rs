//! Factor weight configuration

use crate::error::ConfigError;
use crate::models::factor::FactorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SUM_TOLERANCE: f64 = 1e-9;

/// Non-negative weight per factor. Factors without an entry weigh 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<FactorKind, f64>", into = "BTreeMap<FactorKind, f64>")]
pub struct WeightConfig {
    weights: BTreeMap<FactorKind, f64>,
}

impl WeightConfig {
    /// Validate a weight set. Weights need not sum to 1.0; they are
    /// normalized before use.
    pub fn new<I>(weights: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (FactorKind, f64)>,
    {
        let weights: BTreeMap<FactorKind, f64> = weights.into_iter().collect();
        for (kind, weight) in &weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "weight for {} must be a finite non-negative number, got {}",
                    kind, weight
                )));
            }
        }
        let total: f64 = weights.values().sum();
        if total <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "at least one factor needs a positive weight".to_string(),
            ));
        }
        if !total.is_finite() {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must have a finite sum, got {}",
                total
            )));
        }
        Ok(Self { weights })
    }

    /// Tuned preset: valuation and momentum lead, sentiment and the
    /// oscillators confirm.
    pub fn tuned() -> Self {
        Self {
            weights: BTreeMap::from([
                (FactorKind::Valuation, 0.35),
                (FactorKind::Momentum, 0.30),
                (FactorKind::Sentiment, 0.15),
                (FactorKind::Rsi, 0.10),
                (FactorKind::MovingAverage, 0.10),
            ]),
        }
    }

    /// Equal weight on every factor
    pub fn balanced() -> Self {
        Self {
            weights: FactorKind::ALL.iter().map(|k| (*k, 0.20)).collect(),
        }
    }

    /// Raw configured weight, 0 when absent
    pub fn get(&self, kind: FactorKind) -> f64 {
        self.weights.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() < SUM_TOLERANCE
    }

    /// Copy with weights divided by their sum.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        Self {
            weights: self
                .weights
                .iter()
                .map(|(kind, weight)| (*kind, weight / total))
                .collect(),
        }
    }

    /// Normalized weight for a factor
    pub fn share(&self, kind: FactorKind) -> f64 {
        self.get(kind) / self.total()
    }

    /// Factors with a positive weight, in fixed order
    pub fn active(&self) -> impl Iterator<Item = (FactorKind, f64)> + '_ {
        self.weights
            .iter()
            .filter(|(_, weight)| **weight > 0.0)
            .map(|(kind, weight)| (*kind, *weight))
    }

    /// Copy with one factor's weight replaced.
    pub fn with_weight(&self, kind: FactorKind, weight: f64) -> Result<Self, ConfigError> {
        let mut weights = self.weights.clone();
        weights.insert(kind, weight);
        Self::new(weights)
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::tuned()
    }
}

impl TryFrom<BTreeMap<FactorKind, f64>> for WeightConfig {
    type Error = ConfigError;

    fn try_from(weights: BTreeMap<FactorKind, f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<WeightConfig> for BTreeMap<FactorKind, f64> {
    fn from(config: WeightConfig) -> Self {
        config.weights
    }
}
