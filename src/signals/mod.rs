//! Composite scoring: weights, thresholds, aggregation and confidence.

pub mod aggregation;
pub mod decision;
pub mod engine;
pub mod scoring;
pub mod thresholds;
pub mod weights;

pub use aggregation::*;
pub use decision::*;
pub use engine::CompositeScorer;
pub use scoring::*;
pub use thresholds::ThresholdConfig;
pub use weights::WeightConfig;
