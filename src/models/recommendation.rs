use crate::models::factor::FactorKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five ordered recommendation bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    StrongSell,
    Sell,
    Hold,
    Buy,
    StrongBuy,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::StrongSell,
        Band::Sell,
        Band::Hold,
        Band::Buy,
        Band::StrongBuy,
    ];

    /// Collapse to the three-valued external view.
    pub fn collapse(&self) -> Signal {
        match self {
            Band::StrongSell | Band::Sell => Signal::Sell,
            Band::Hold => Signal::Hold,
            Band::Buy | Band::StrongBuy => Signal::Buy,
        }
    }

    /// +1 for the buy side, -1 for the sell side, 0 for hold
    pub fn direction(&self) -> i8 {
        self.collapse().direction()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::StrongSell => "STRONG_SELL",
            Band::Sell => "SELL",
            Band::Hold => "HOLD",
            Band::Buy => "BUY",
            Band::StrongBuy => "STRONG_BUY",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buy/hold/sell view reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Sell,
    Hold,
    Buy,
}

impl Signal {
    pub fn direction(&self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }
}

/// How a single factor fed into the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub value: f64,
    /// Weight after normalization
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    /// Weighted sum of factor values, not clamped
    pub score: f64,
    pub recommendation: Band,
    pub signal: Signal,
    pub confidence: f64,
    pub contributions: BTreeMap<FactorKind, FactorContribution>,
    pub rationale: String,
}

/// Suggested price levels attached to a live recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetLevels {
    Directional {
        entry: f64,
        target_1: f64,
        target_2: f64,
        stop_loss: f64,
    },
    Range {
        entry: f64,
        support: f64,
        resistance: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub as_of: DateTime<Utc>,
    pub current_price: f64,
    #[serde(flatten)]
    pub composite: CompositeResult,
    pub targets: TargetLevels,
}
