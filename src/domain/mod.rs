//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - reference-table rows and trajectory kinds (`ReferenceFactor`, `Trajectory`)
//! - engine inputs (`VesselInfo`, `EmissionRecord`)
//! - engine outputs (`BaselineBundle`, `QuarterlyDeviation`) and batch rows

pub mod types;

pub use types::*;
