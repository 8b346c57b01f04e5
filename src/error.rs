//! Error types shared by the scorer, the evaluator and configuration loading.

use crate::models::factor::FactorKind;
use thiserror::Error;

/// Failure of a single scoring call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A factor with a non-zero weight was not supplied.
    #[error("missing factor: {0} has a non-zero weight but no score was supplied")]
    MissingFactor(FactorKind),

    #[error("invalid value {value} for factor {kind}: expected a finite value in [-1, 1]")]
    InvalidFactorValue { kind: FactorKind, value: f64 },
}

/// Rejected configuration. Raised once, when the configuration is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid threshold config: {0}")]
    InvalidThresholds(String),

    #[error("invalid weight config: {0}")]
    InvalidWeights(String),

    #[error("invalid backtest config: {0}")]
    InvalidBacktest(String),

    #[error("missing required setting {0}")]
    Missing(String),

    #[error("could not parse {key}={value}")]
    Parse { key: String, value: String },
}

/// Backtest input file could not be used.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse backtest input: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_staleness_hours must be a non-negative number of hours within range, got {0}")]
    InvalidStaleness(i64),
}

/// Point-in-time factor data could not be produced for an as-of cutoff.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("factor lookup failed at {as_of}: {message}")]
pub struct FactorLookupFailure {
    pub as_of: chrono::DateTime<chrono::Utc>,
    pub message: String,
}

impl FactorLookupFailure {
    pub fn new(as_of: chrono::DateTime<chrono::Utc>, message: impl Into<String>) -> Self {
        Self {
            as_of,
            message: message.into(),
        }
    }
}
