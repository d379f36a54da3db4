//! Deviation analytics over a vessel's emission history.
//!
//! - `quarterly`: one representative reading per calendar quarter
//! - `calculator`: percentage gap between actual intensity and baseline targets

pub mod calculator;
pub mod quarterly;

pub use calculator::*;
pub use quarterly::*;
