//! Boundaries to the external factor providers.

pub mod factor_provider;

pub use factor_provider::{
    provider_fn, AsOf, FactorProvider, FactorSnapshot, FactorTimeline, FnProvider,
};
