//! Environment-driven configuration.
//!
//! Every setting is read through a lookup function so the same parsing runs
//! against the process environment in binaries and a plain map in tests.

use crate::backtest::config::BacktestConfig;
use crate::error::ConfigError;
use crate::models::factor::FactorKind;
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_STEP_DAYS: u32 = 7;
pub const DEFAULT_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_INTERVAL_SECONDS: u64 = 3600;

/// Deployment environment, `sandbox` unless `ENVIRONMENT` says otherwise
pub fn get_environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Reads the process environment
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or<T, L>(lookup: &L, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_required<T, L>(lookup: &L, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::Missing(key.to_string()))?;
    parse_value(key, &value)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::Parse {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn weight_key(kind: FactorKind) -> String {
    format!("ADVISOR_WEIGHT_{}", kind.as_str().to_uppercase())
}

/// `ADVISOR_WEIGHT_<FACTOR>`; unset factors keep the tuned preset weight.
pub fn load_weights<L>(lookup: &L) -> Result<WeightConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let defaults = WeightConfig::tuned();
    let weights = FactorKind::ALL
        .iter()
        .map(|kind| Ok((*kind, parse_or(lookup, &weight_key(*kind), defaults.get(*kind))?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    WeightConfig::new(weights)
}

/// `ADVISOR_THRESHOLD_{STRONG_SELL,SELL,BUY,STRONG_BUY}`
pub fn load_thresholds<L>(lookup: &L) -> Result<ThresholdConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let defaults = ThresholdConfig::default();
    ThresholdConfig::new(
        parse_or(lookup, "ADVISOR_THRESHOLD_STRONG_SELL", defaults.strong_sell())?,
        parse_or(lookup, "ADVISOR_THRESHOLD_SELL", defaults.sell())?,
        parse_or(lookup, "ADVISOR_THRESHOLD_BUY", defaults.buy())?,
        parse_or(lookup, "ADVISOR_THRESHOLD_STRONG_BUY", defaults.strong_buy())?,
    )
}

/// `BACKTEST_STEP_DAYS`, `BACKTEST_HORIZON_DAYS`, and the required
/// `BACKTEST_HOLD_TOLERANCE_PCT`
pub fn load_backtest_config<L>(lookup: &L) -> Result<BacktestConfig, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    BacktestConfig::new(
        parse_or(lookup, "BACKTEST_STEP_DAYS", DEFAULT_STEP_DAYS)?,
        parse_or(lookup, "BACKTEST_HORIZON_DAYS", DEFAULT_HORIZON_DAYS)?,
        parse_required(lookup, "BACKTEST_HOLD_TOLERANCE_PCT")?,
    )
}

/// Settings for the periodic advisor worker
#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    pub weights: WeightConfig,
    pub thresholds: ThresholdConfig,
    pub interval_seconds: u64,
    pub snapshot_path: PathBuf,
}

impl AdvisorSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<L>(lookup: &L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let interval_seconds = parse_or(lookup, "ADVISOR_INTERVAL_SECONDS", DEFAULT_INTERVAL_SECONDS)?;
        if interval_seconds == 0 {
            return Err(ConfigError::Parse {
                key: "ADVISOR_INTERVAL_SECONDS".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Self {
            weights: load_weights(lookup)?,
            thresholds: load_thresholds(lookup)?,
            interval_seconds,
            snapshot_path: PathBuf::from(parse_required::<String, _>(lookup, "ADVISOR_SNAPSHOT_PATH")?),
        })
    }
}

/// Settings for the backtest binary
#[derive(Debug, Clone)]
pub struct BacktestSettings {
    pub weights: WeightConfig,
    pub thresholds: ThresholdConfig,
    pub backtest: BacktestConfig,
    pub input_path: PathBuf,
}

impl BacktestSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<L>(lookup: &L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            weights: load_weights(lookup)?,
            thresholds: load_thresholds(lookup)?,
            backtest: load_backtest_config(lookup)?,
            input_path: PathBuf::from(parse_required::<String, _>(lookup, "BACKTEST_INPUT_PATH")?),
        })
    }
}
