//! Live recommendation: provider lookup, scoring and price targets.

use crate::models::recommendation::Recommendation;
use crate::services::factor_provider::{AsOf, FactorProvider};
use crate::signals::decision::PriceTargets;
use crate::signals::engine::CompositeScorer;
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Lookup(#[from] crate::error::FactorLookupFailure),
    #[error(transparent)]
    Scoring(#[from] crate::error::ScoringError),
    #[error("current price must be positive and finite, got {0}")]
    InvalidPrice(f64),
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    weights: WeightConfig,
    thresholds: ThresholdConfig,
}

impl RecommendationEngine {
    pub fn new(weights: WeightConfig, thresholds: ThresholdConfig) -> Self {
        Self { weights, thresholds }
    }

    pub fn recommend<P>(
        &self,
        provider: &P,
        as_of: &AsOf<'_>,
        current_price: f64,
    ) -> Result<Recommendation, RecommendationError>
    where
        P: FactorProvider + ?Sized,
    {
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(RecommendationError::InvalidPrice(current_price));
        }
        let factors = provider.factors_as_of(as_of)?;
        let composite = CompositeScorer::score(&factors, &self.weights, &self.thresholds)?;
        let targets = PriceTargets::calculate(current_price, composite.signal, composite.confidence);

        Ok(Recommendation {
            as_of: as_of.timestamp(),
            current_price,
            composite,
            targets,
        })
    }
}
