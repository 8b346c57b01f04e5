//! Composite scoring engine.

use crate::error::ScoringError;
use crate::models::factor::FactorSet;
use crate::models::recommendation::CompositeResult;
use crate::signals::aggregation::Aggregator;
use crate::signals::scoring::{band_margin, calculate_confidence, factor_agreement};
use crate::signals::thresholds::ThresholdConfig;
use crate::signals::weights::WeightConfig;

pub struct CompositeScorer;

impl CompositeScorer {
    /// Combine per-factor scores into one recommendation.
    ///
    /// Pure function of its inputs: identical inputs give identical results.
    pub fn score(
        factors: &FactorSet,
        weights: &WeightConfig,
        thresholds: &ThresholdConfig,
    ) -> Result<CompositeResult, ScoringError> {
        let contributions = Aggregator::contributions(factors, weights)?;
        let score = Aggregator::composite_score(&contributions);
        let band = thresholds.classify(score);

        let agreement = factor_agreement(&Aggregator::weighted_values(&contributions), band);
        let margin = band_margin(score, band, thresholds);
        let confidence = calculate_confidence(margin, agreement);

        let rationale =
            Aggregator::generate_rationale(band, score, factors, &contributions, agreement);

        Ok(CompositeResult {
            score,
            recommendation: band,
            signal: band.collapse(),
            confidence,
            contributions,
            rationale,
        })
    }
}
