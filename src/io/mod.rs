//! Input/output helpers.
//!
//! - reference table + vessel registry JSON (`reference`)
//! - emission CSV ingest + validation (`ingest`)
//! - batch result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;
pub mod reference;

pub use export::*;
pub use ingest::*;
pub use reference::*;
