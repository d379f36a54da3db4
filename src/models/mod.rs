//! Reference-row evaluation.
//!
//! Kept as small, pure functions so the aggregation and deviation code can
//! treat a reference row as "a function of year and deadweight".

pub mod polynomial;

pub use polynomial::*;
