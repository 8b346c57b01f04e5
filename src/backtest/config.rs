use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Walk-forward schedule and the HOLD correctness policy.
///
/// The hold tolerance has no default; callers must state it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBacktestConfig")]
pub struct BacktestConfig {
    step_days: u32,
    horizon_days: u32,
    hold_tolerance_pct: f64,
}

#[derive(Deserialize)]
struct RawBacktestConfig {
    step_days: u32,
    horizon_days: u32,
    hold_tolerance_pct: f64,
}

impl TryFrom<RawBacktestConfig> for BacktestConfig {
    type Error = ConfigError;

    fn try_from(raw: RawBacktestConfig) -> Result<Self, Self::Error> {
        Self::new(raw.step_days, raw.horizon_days, raw.hold_tolerance_pct)
    }
}

impl BacktestConfig {
    pub fn new(step_days: u32, horizon_days: u32, hold_tolerance_pct: f64) -> Result<Self, ConfigError> {
        if step_days == 0 {
            return Err(ConfigError::InvalidBacktest("step_days must be > 0".to_string()));
        }
        if horizon_days == 0 {
            return Err(ConfigError::InvalidBacktest("horizon_days must be > 0".to_string()));
        }
        if !hold_tolerance_pct.is_finite() || hold_tolerance_pct < 0.0 {
            return Err(ConfigError::InvalidBacktest(format!(
                "hold_tolerance_pct must be a finite non-negative percentage, got {}",
                hold_tolerance_pct
            )));
        }
        Ok(Self {
            step_days,
            horizon_days,
            hold_tolerance_pct,
        })
    }

    pub fn step_days(&self) -> u32 {
        self.step_days
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn hold_tolerance_pct(&self) -> f64 {
        self.hold_tolerance_pct
    }
}
