//! JSON input for offline backtest runs

use crate::backtest::sweep::WeightPreset;
use crate::error::InputError;
use crate::models::backtest::PricePoint;
use crate::services::factor_provider::{FactorSnapshot, FactorTimeline};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Price history plus the factor snapshots recorded alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestInput {
    pub prices: Vec<PricePoint>,
    pub factors: Vec<FactorSnapshot>,
    /// Snapshots older than this at a checkpoint are treated as unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_staleness_hours: Option<i64>,
    /// Optional presets to compare against the configured weights
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<WeightPreset>,
}

impl BacktestInput {
    /// Parse and validate an input file.
    pub fn from_json(raw: &str) -> Result<Self, InputError> {
        let input: Self = serde_json::from_str(raw)?;
        input.max_staleness()?;
        Ok(input)
    }

    /// Staleness limit as a duration; must be non-negative and representable.
    pub fn max_staleness(&self) -> Result<Option<Duration>, InputError> {
        let Some(hours) = self.max_staleness_hours else {
            return Ok(None);
        };
        if hours < 0 {
            return Err(InputError::InvalidStaleness(hours));
        }
        Duration::try_hours(hours)
            .map(Some)
            .ok_or(InputError::InvalidStaleness(hours))
    }

    pub fn timeline(&self) -> Result<FactorTimeline, InputError> {
        let timeline = FactorTimeline::new(self.factors.clone());
        Ok(match self.max_staleness()? {
            Some(limit) => timeline.with_max_staleness(limit),
            None => timeline,
        })
    }
}
