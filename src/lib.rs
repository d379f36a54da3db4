//! `vessel-baselines` library crate.
//!
//! The binary (`vb`) is a thin wrapper around this library so that:
//!
//! - the baseline/deviation engine is testable without spawning processes
//! - every consumer (CLI, batch jobs, a future service) calls the same engine
//!   instead of re-implementing the math
//!
//! The engine (`baseline`, `deviation`, `models`) is pure: the reference table
//! is passed in on every call and nothing is cached between calls.

pub mod app;
pub mod baseline;
pub mod cli;
pub mod deviation;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
