//! Core application primitives (live recommendation, periodic worker)

pub mod recommendation;
pub mod runtime;

pub use recommendation::*;
pub use runtime::*;
