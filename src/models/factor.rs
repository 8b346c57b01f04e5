use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The independent signals that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Rsi,
    #[serde(alias = "ma", alias = "moving_averages")]
    MovingAverage,
    #[serde(alias = "power_law")]
    Valuation,
    #[serde(alias = "macd")]
    Momentum,
    Sentiment,
}

impl FactorKind {
    pub const ALL: [FactorKind; 5] = [
        FactorKind::Rsi,
        FactorKind::MovingAverage,
        FactorKind::Valuation,
        FactorKind::Momentum,
        FactorKind::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Rsi => "rsi",
            FactorKind::MovingAverage => "moving_average",
            FactorKind::Valuation => "valuation",
            FactorKind::Momentum => "momentum",
            FactorKind::Sentiment => "sentiment",
        }
    }

    /// Human-readable label used in rationale text
    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::Rsi => "RSI",
            FactorKind::MovingAverage => "Moving averages",
            FactorKind::Valuation => "Power-law valuation",
            FactorKind::Momentum => "MACD momentum",
            FactorKind::Sentiment => "Sentiment",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized factor reading for a single evaluation instant.
///
/// `value` is bearish at -1 and bullish at +1. `raw_metrics` carries the
/// provider's diagnostic inputs (e.g. the raw RSI or the fair-value deviation)
/// and is only used for explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: FactorKind,
    pub value: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw_metrics: BTreeMap<String, f64>,
}

impl FactorScore {
    pub fn new(name: FactorKind, value: f64) -> Result<Self, ScoringError> {
        validate_value(name, value)?;
        Ok(Self {
            name,
            value,
            raw_metrics: BTreeMap::new(),
        })
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.raw_metrics.insert(key.into(), value);
        self
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        validate_value(self.name, self.value)
    }
}

fn validate_value(kind: FactorKind, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() && (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::InvalidFactorValue { kind, value })
    }
}

/// Factor readings for one instant, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FactorScore>", into = "Vec<FactorScore>")]
pub struct FactorSet {
    scores: BTreeMap<FactorKind, FactorScore>,
}

impl FactorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, replacing any earlier score of the same kind.
    pub fn insert(&mut self, score: FactorScore) {
        self.scores.insert(score.name, score);
    }

    pub fn with(mut self, score: FactorScore) -> Self {
        self.insert(score);
        self
    }

    pub fn get(&self, kind: FactorKind) -> Option<&FactorScore> {
        self.scores.get(&kind)
    }

    pub fn value(&self, kind: FactorKind) -> Option<f64> {
        self.scores.get(&kind).map(|s| s.value)
    }

    pub fn contains(&self, kind: FactorKind) -> bool {
        self.scores.contains_key(&kind)
    }

    /// Scores in fixed factor order
    pub fn iter(&self) -> impl Iterator<Item = &FactorScore> {
        self.scores.values()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<FactorScore> for FactorSet {
    fn from_iter<I: IntoIterator<Item = FactorScore>>(iter: I) -> Self {
        let mut set = FactorSet::new();
        for score in iter {
            set.insert(score);
        }
        set
    }
}

impl TryFrom<Vec<FactorScore>> for FactorSet {
    type Error = ScoringError;

    fn try_from(scores: Vec<FactorScore>) -> Result<Self, Self::Error> {
        for score in &scores {
            score.validate()?;
        }
        Ok(scores.into_iter().collect())
    }
}

impl From<FactorSet> for Vec<FactorScore> {
    fn from(set: FactorSet) -> Self {
        set.scores.into_values().collect()
    }
}
