//! Baseline computation.
//!
//! Responsibilities:
//!
//! - select the MIN/STR reference rows for a vessel type (`lookup`)
//! - evaluate both rows and build the tolerance band (`trajectory`)

pub mod lookup;
pub mod trajectory;

pub use lookup::*;
pub use trajectory::*;
