//! Shared data models spanning the scoring and backtest layers.

pub mod backtest;
pub mod factor;
pub mod recommendation;

pub use backtest::{
    Accuracy, BacktestCheckpoint, BacktestReport, CheckpointStatus, FactorAccuracy,
    IncompleteReason, PricePoint, ReportConfig, ScoreDistribution, SignalDistribution,
};
pub use factor::{FactorKind, FactorScore, FactorSet};
pub use recommendation::{
    Band, CompositeResult, FactorContribution, Recommendation, Signal, TargetLevels,
};
