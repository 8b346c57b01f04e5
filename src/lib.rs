//! Composite Buy/Hold/Sell scoring for Bitcoin with a walk-forward backtester.

pub mod backtest;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{ConfigError, FactorLookupFailure, InputError, ScoringError};
