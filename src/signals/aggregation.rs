//! Weighted aggregation and explainability

use crate::error::ScoringError;
use crate::models::factor::{FactorKind, FactorSet};
use crate::models::recommendation::{Band, FactorContribution};
use crate::signals::weights::WeightConfig;
use std::collections::BTreeMap;

/// Contributions at or below this magnitude are left out of the rationale.
pub const MATERIALITY_CUTOFF: f64 = 0.02;

pub struct Aggregator;

impl Aggregator {
    /// Weighted contribution of every supplied factor.
    ///
    /// Fails if a factor with a positive weight is absent. Supplied factors
    /// without a weight are kept with a zero contribution.
    pub fn contributions(
        factors: &FactorSet,
        weights: &WeightConfig,
    ) -> Result<BTreeMap<FactorKind, FactorContribution>, ScoringError> {
        for (kind, _) in weights.active() {
            if !factors.contains(kind) {
                return Err(ScoringError::MissingFactor(kind));
            }
        }

        let mut contributions = BTreeMap::new();
        for factor in factors.iter() {
            factor.validate()?;
            let weight = weights.share(factor.name);
            contributions.insert(
                factor.name,
                FactorContribution {
                    value: factor.value,
                    weight,
                    contribution: factor.value * weight,
                },
            );
        }
        Ok(contributions)
    }

    /// Sum of weighted contributions, in fixed factor order
    pub fn composite_score(contributions: &BTreeMap<FactorKind, FactorContribution>) -> f64 {
        contributions.values().map(|c| c.contribution).sum()
    }

    /// Values of the factors that carry weight
    pub fn weighted_values(contributions: &BTreeMap<FactorKind, FactorContribution>) -> Vec<f64> {
        contributions
            .values()
            .filter(|c| c.weight > 0.0)
            .map(|c| c.value)
            .collect()
    }

    /// Factor-by-factor summary. Every material contributor is named.
    pub fn generate_rationale(
        band: Band,
        score: f64,
        factors: &FactorSet,
        contributions: &BTreeMap<FactorKind, FactorContribution>,
        agreement: f64,
    ) -> String {
        let mut parts = vec![format!("{} (score {:+.3})", band, score)];

        let material: Vec<String> = contributions
            .iter()
            .filter(|(_, c)| c.contribution.abs() > MATERIALITY_CUTOFF)
            .map(|(kind, c)| {
                let lean = if c.value > 0.0 {
                    "bullish"
                } else if c.value < 0.0 {
                    "bearish"
                } else {
                    "neutral"
                };
                let mut clause = format!(
                    "{} {} ({:+.3} x {:.2} = {:+.3})",
                    kind.label(),
                    lean,
                    c.value,
                    c.weight,
                    c.contribution
                );
                if let Some(score) = factors.get(*kind) {
                    if !score.raw_metrics.is_empty() {
                        let metrics: Vec<String> = score
                            .raw_metrics
                            .iter()
                            .map(|(name, value)| format!("{}={:.2}", name, value))
                            .collect();
                        clause.push_str(&format!(" [{}]", metrics.join(", ")));
                    }
                }
                clause
            })
            .collect();

        if material.is_empty() {
            parts.push("No factor contributed materially".to_string());
        } else {
            parts.push(material.join("; "));
        }

        let weighted = contributions.values().filter(|c| c.weight > 0.0).count();
        let agreeing = (agreement * weighted as f64).round() as usize;
        if agreeing == weighted {
            parts.push("All weighted factors agree".to_string());
        } else if agreement >= 0.5 {
            parts.push(format!(
                "Most weighted factors agree ({} of {})",
                agreeing, weighted
            ));
        } else {
            parts.push(format!(
                "Factors disagree ({} of {} agree); the weighted score decides",
                agreeing, weighted
            ));
        }

        parts.join(". ") + "."
    }
}
