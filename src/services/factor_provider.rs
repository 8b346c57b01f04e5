//! Factor score provider interface and in-memory implementations.

use crate::error::FactorLookupFailure;
use crate::models::backtest::PricePoint;
use crate::models::factor::FactorSet;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time cutoff handed to a provider.
///
/// Only prices at or before `timestamp` are reachable through it, so a
/// provider cannot see data from after the instant it is scoring.
#[derive(Debug, Clone, Copy)]
pub struct AsOf<'a> {
    timestamp: DateTime<Utc>,
    prices: &'a [PricePoint],
}

impl<'a> AsOf<'a> {
    /// `prices` must be ordered by timestamp; anything after the cutoff is cut off.
    pub fn new(timestamp: DateTime<Utc>, prices: &'a [PricePoint]) -> Self {
        let visible = prices.partition_point(|p| p.timestamp <= timestamp);
        Self {
            timestamp,
            prices: &prices[..visible],
        }
    }

    /// Cutoff with no price history attached
    pub fn at(timestamp: DateTime<Utc>) -> AsOf<'static> {
        AsOf {
            timestamp,
            prices: &[],
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn prices(&self) -> &'a [PricePoint] {
        self.prices
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.price)
    }
}

pub trait FactorProvider {
    /// Factor scores as they stood at the cutoff.
    fn factors_as_of(&self, as_of: &AsOf<'_>) -> Result<FactorSet, FactorLookupFailure>;
}

impl<P: FactorProvider + ?Sized> FactorProvider for &P {
    fn factors_as_of(&self, as_of: &AsOf<'_>) -> Result<FactorSet, FactorLookupFailure> {
        (**self).factors_as_of(as_of)
    }
}

/// Provider backed by a closure.
pub struct FnProvider<F>(F);

pub fn provider_fn<F>(f: F) -> FnProvider<F>
where
    F: Fn(&AsOf<'_>) -> Result<FactorSet, FactorLookupFailure>,
{
    FnProvider(f)
}

impl<F> FactorProvider for FnProvider<F>
where
    F: Fn(&AsOf<'_>) -> Result<FactorSet, FactorLookupFailure>,
{
    fn factors_as_of(&self, as_of: &AsOf<'_>) -> Result<FactorSet, FactorLookupFailure> {
        (self.0)(as_of)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub factors: FactorSet,
}

/// Time-ordered factor snapshots, answered with the latest one at or before
/// the cutoff.
#[derive(Debug, Clone, Default)]
pub struct FactorTimeline {
    snapshots: Vec<FactorSnapshot>,
    max_staleness: Option<Duration>,
}

impl FactorTimeline {
    pub fn new(mut snapshots: Vec<FactorSnapshot>) -> Self {
        snapshots.sort_by_key(|s| s.timestamp);
        Self {
            snapshots,
            max_staleness: None,
        }
    }

    /// Reject snapshots older than `max_staleness` at lookup time.
    pub fn with_max_staleness(mut self, max_staleness: Duration) -> Self {
        self.max_staleness = Some(max_staleness);
        self
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FactorProvider for FactorTimeline {
    fn factors_as_of(&self, as_of: &AsOf<'_>) -> Result<FactorSet, FactorLookupFailure> {
        let cutoff = as_of.timestamp();
        let visible = self.snapshots.partition_point(|s| s.timestamp <= cutoff);
        let snapshot = visible
            .checked_sub(1)
            .map(|i| &self.snapshots[i])
            .ok_or_else(|| FactorLookupFailure::new(cutoff, "no factor snapshot at or before cutoff"))?;

        if let Some(max_staleness) = self.max_staleness {
            let age = cutoff - snapshot.timestamp;
            if age > max_staleness {
                return Err(FactorLookupFailure::new(
                    cutoff,
                    format!(
                        "latest snapshot from {} is {}h old (limit {}h)",
                        snapshot.timestamp,
                        age.num_hours(),
                        max_staleness.num_hours()
                    ),
                ));
            }
        }
        Ok(snapshot.factors.clone())
    }
}
