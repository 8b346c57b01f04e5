//! Walk-forward backtesting of the composite scorer.

pub mod config;
pub mod correctness;
pub mod evaluator;
pub mod input;
pub mod report;
pub mod stats;
pub mod sweep;

pub use config::BacktestConfig;
pub use correctness::{is_correct, price_change_pct};
pub use evaluator::BacktestEvaluator;
pub use input::BacktestInput;
pub use sweep::{SweepRow, WeightPreset, WeightSweep};
