//! Command-line parsing for the vessel baseline tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the baseline/deviation math.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vb", version, about = "Vessel carbon-intensity baselines and deviations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute MIN/STR baselines and the tolerance band for one vessel.
    Baseline(BaselineArgs),
    /// Deviation of one vessel's emission history (latest quarter + per-quarter series).
    Deviation(DeviationArgs),
    /// Deviations for every vessel in a registry file.
    Batch(BatchArgs),
    /// Deviation of a single actual value against the computed target.
    Compare(CompareArgs),
}

/// Reference table location.
#[derive(Debug, Args, Clone)]
pub struct ReferenceArgs {
    /// Reference factor table (JSON). Falls back to `VB_REFERENCE_PATH` (.env).
    #[arg(long, value_name = "JSON")]
    pub reference: Option<PathBuf>,
}

/// Vessel characteristics.
#[derive(Debug, Args, Clone)]
pub struct VesselArgs {
    /// Vessel type identifier as used by the reference table.
    #[arg(short = 't', long)]
    pub vessel_type: i64,

    /// Deadweight tonnage.
    #[arg(short = 'd', long)]
    pub dwt: Decimal,
}

#[derive(Debug, Args, Clone)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub vessel: VesselArgs,

    /// Reporting year.
    #[arg(short = 'y', long)]
    pub year: i32,

    /// Print a table from `--year` through this year (inclusive).
    #[arg(long)]
    pub to_year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct DeviationArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub vessel: VesselArgs,

    /// Emission CSV (`to_utc`, `eeoico2ew2w`, optional `vessel_imo`).
    #[arg(long, value_name = "CSV")]
    pub emissions: PathBuf,

    /// Only use rows tagged with this IMO number.
    #[arg(long)]
    pub imo: Option<i64>,

    /// Also print the per-quarter series.
    #[arg(long)]
    pub series: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Vessel registry (JSON array of `id`, `name`, `imoNo`, `dwt`, `vesselType`).
    #[arg(long, value_name = "JSON")]
    pub vessels: PathBuf,

    /// Emission CSV with a `vessel_imo` column.
    #[arg(long, value_name = "CSV")]
    pub emissions: PathBuf,

    /// Export per-quarter rows to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Export per-quarter rows to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Print every per-quarter row, not just the vessel summary.
    #[arg(long)]
    pub verbose_rows: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub vessel: VesselArgs,

    /// Reporting year used for the target.
    #[arg(short = 'y', long)]
    pub year: i32,

    /// Actual carbon intensity.
    #[arg(short = 'a', long)]
    pub actual: Decimal,
}
