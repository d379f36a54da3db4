//! Mathematical utilities: decimal powers and reporting-precision rounding.

pub mod decimal;

pub use decimal::*;
