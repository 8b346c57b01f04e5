//! Periodic advisor worker

use crate::core::recommendation::{RecommendationEngine, RecommendationError};
use crate::error::FactorLookupFailure;
use crate::models::factor::FactorSet;
use crate::models::recommendation::Recommendation;
use crate::services::factor_provider::{AsOf, FactorProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Latest provider output, written to disk by the data-fetch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub factors: FactorSet,
}

impl FactorProvider for MarketSnapshot {
    fn factors_as_of(&self, as_of: &AsOf<'_>) -> Result<FactorSet, FactorLookupFailure> {
        if self.timestamp > as_of.timestamp() {
            return Err(FactorLookupFailure::new(
                as_of.timestamp(),
                format!("snapshot from {} is after the cutoff", self.timestamp),
            ));
        }
        Ok(self.factors.clone())
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub interval_seconds: u64,
    pub snapshot_path: PathBuf,
}

pub struct AdvisorRuntime {
    config: RuntimeConfig,
    engine: RecommendationEngine,
}

impl AdvisorRuntime {
    pub fn new(config: RuntimeConfig, engine: RecommendationEngine) -> Self {
        Self { config, engine }
    }

    pub async fn load_snapshot(&self) -> Result<MarketSnapshot, RuntimeError> {
        let path = &self.config.snapshot_path;
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| RuntimeError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RuntimeError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Produce one recommendation from the current snapshot.
    pub async fn tick(&self) -> Result<Recommendation, RuntimeError> {
        let snapshot = self.load_snapshot().await?;
        let as_of = AsOf::at(snapshot.timestamp);
        Ok(self.engine.recommend(&snapshot, &as_of, snapshot.price)?)
    }

    /// Tick on a fixed interval until the task is aborted.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        info!(
            interval = self.config.interval_seconds,
            snapshot = %self.config.snapshot_path.display(),
            "AdvisorRuntime: starting"
        );
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_seconds));
            loop {
                interval.tick().await;
                match self.tick().await {
                    Ok(recommendation) => log_recommendation(&recommendation),
                    Err(e) => warn!(error = %e, "AdvisorRuntime: tick failed"),
                }
            }
        })
    }
}

/// JSON form of a recommendation for the log line; `None` (with a warning)
/// if it cannot be serialized.
pub fn recommendation_payload(recommendation: &Recommendation) -> Option<String> {
    match serde_json::to_string(recommendation) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!(error = %e, "AdvisorRuntime: failed to serialize recommendation");
            None
        }
    }
}

fn log_recommendation(recommendation: &Recommendation) {
    let composite = &recommendation.composite;
    match recommendation_payload(recommendation) {
        Some(payload) => info!(
            recommendation = %composite.recommendation,
            score = composite.score,
            confidence = composite.confidence,
            price = recommendation.current_price,
            payload = %payload,
            "AdvisorRuntime: {}",
            composite.rationale
        ),
        None => info!(
            recommendation = %composite.recommendation,
            score = composite.score,
            confidence = composite.confidence,
            price = recommendation.current_price,
            "AdvisorRuntime: {}",
            composite.rationale
        ),
    }
}
