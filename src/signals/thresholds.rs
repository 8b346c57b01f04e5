//! Composite score band boundaries

use crate::error::ConfigError;
use crate::models::recommendation::Band;
use serde::{Deserialize, Serialize};

/// Four strictly increasing boundaries splitting the score line into five bands.
///
/// A score equal to a boundary has crossed it and belongs to the band above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct ThresholdConfig {
    strong_sell: f64,
    sell: f64,
    buy: f64,
    strong_buy: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
    strong_sell: f64,
    sell: f64,
    buy: f64,
    strong_buy: f64,
}

impl TryFrom<RawThresholds> for ThresholdConfig {
    type Error = ConfigError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.strong_sell, raw.sell, raw.buy, raw.strong_buy)
    }
}

impl ThresholdConfig {
    pub fn new(strong_sell: f64, sell: f64, buy: f64, strong_buy: f64) -> Result<Self, ConfigError> {
        let bounds = [strong_sell, sell, buy, strong_buy];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ConfigError::InvalidThresholds(format!(
                "boundaries must be finite, got {:?}",
                bounds
            )));
        }
        if !bounds.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ConfigError::InvalidThresholds(format!(
                "boundaries must be strictly increasing (strong_sell < sell < buy < strong_buy), got {:?}",
                bounds
            )));
        }
        Ok(Self {
            strong_sell,
            sell,
            buy,
            strong_buy,
        })
    }

    pub fn strong_sell(&self) -> f64 {
        self.strong_sell
    }

    pub fn sell(&self) -> f64 {
        self.sell
    }

    pub fn buy(&self) -> f64 {
        self.buy
    }

    pub fn strong_buy(&self) -> f64 {
        self.strong_buy
    }

    pub fn classify(&self, score: f64) -> Band {
        if score < self.strong_sell {
            Band::StrongSell
        } else if score < self.sell {
            Band::Sell
        } else if score < self.buy {
            Band::Hold
        } else if score < self.strong_buy {
            Band::Buy
        } else {
            Band::StrongBuy
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            strong_sell: -0.70,
            sell: -0.15,
            buy: 0.25,
            strong_buy: 0.70,
        }
    }
}
