//! Top-level application orchestration.
//!
//! `src/main.rs` only maps errors to exit codes; this module:
//! - installs logging
//! - parses CLI arguments
//! - loads the reference table once per command
//! - runs the engine and prints reports
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::baseline::{compute_baseline_range, compute_baselines};
use crate::cli::{BaselineArgs, BatchArgs, Command, CompareArgs, DeviationArgs, ReferenceArgs, VesselArgs};
use crate::deviation::{deviation_percent, latest_quarter_deviation, quarterly_deviation_series};
use crate::domain::{BatchConfig, ReferenceFactor, VesselInfo};
use crate::error::AppError;
use crate::io::ingest::load_emissions;
use crate::io::reference::{load_reference_factors, resolve_reference_path};
use crate::math::format_report;

pub mod pipeline;

/// Entry point for the `vb` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Baseline(args) => handle_baseline(args),
        Command::Deviation(args) => handle_deviation(args),
        Command::Batch(args) => handle_batch(args),
        Command::Compare(args) => handle_compare(args),
    }
}

fn init_logging() {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vessel_baselines=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_factors(args: &ReferenceArgs) -> Result<Vec<ReferenceFactor>, AppError> {
    let path = resolve_reference_path(args.reference.as_deref())?;
    load_reference_factors(&path)
}

fn vessel_info(args: &VesselArgs) -> Result<VesselInfo, AppError> {
    VesselInfo::new(args.dwt, args.vessel_type)
}

fn handle_baseline(args: BaselineArgs) -> Result<(), AppError> {
    let factors = load_factors(&args.reference)?;
    let vessel = vessel_info(&args.vessel)?;

    match args.to_year {
        Some(to_year) if to_year > args.year => {
            let rows = compute_baseline_range(&factors, args.year..=to_year, &vessel)?;
            println!("{}", crate::report::format_baseline_table(&rows));
        }
        Some(to_year) if to_year < args.year => {
            return Err(AppError::invalid_input(
                "to_year",
                format!("{to_year} is before --year {}", args.year),
            ));
        }
        _ => {
            let bundle = compute_baselines(&factors, args.year, &vessel)?;
            println!("{}", crate::report::format_bundle(&bundle, &vessel, args.year));
        }
    }
    Ok(())
}

fn handle_deviation(args: DeviationArgs) -> Result<(), AppError> {
    let factors = load_factors(&args.reference)?;
    let vessel = vessel_info(&args.vessel)?;
    let ingest = load_emissions(&args.emissions)?;

    let records = match args.imo {
        Some(imo) => ingest.records_for(imo),
        None => ingest.all_records(),
    };
    if records.is_empty() {
        return Err(AppError::no_data(format!(
            "No emission records in '{}'{}.",
            args.emissions.display(),
            args.imo.map(|imo| format!(" for IMO {imo}")).unwrap_or_default()
        )));
    }
    info!(records = records.len(), skipped_rows = ingest.rows_skipped, "emissions loaded");

    let deviation = latest_quarter_deviation(&records, &vessel, &factors)?;
    println!("{}", crate::report::format_latest_deviation(deviation));

    if args.series {
        let series = quarterly_deviation_series(&records, &vessel, &factors)?;
        println!();
        println!("{}", crate::report::format_series(&series));
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = BatchConfig {
        reference_path: resolve_reference_path(args.reference.reference.as_deref())?,
        vessels_path: args.vessels.clone(),
        emissions_path: args.emissions.clone(),
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    };
    let output = pipeline::run_batch(&config)?;

    println!("{}", crate::report::format_summaries(&output.summaries));
    if args.verbose_rows {
        println!("{}", crate::report::format_batch_rows(&output.rows));
    }
    if !output.skipped.is_empty() {
        info!(vessels = output.skipped.len(), "vessels without emissions data");
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_results_csv(path, &output.rows)?;
        info!(path = %path.display(), rows = output.rows.len(), "results exported");
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_results_json(path, &output.rows)?;
        info!(path = %path.display(), rows = output.rows.len(), "results exported");
    }
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let factors = load_factors(&args.reference)?;
    let vessel = vessel_info(&args.vessel)?;
    let bundle = compute_baselines(&factors, args.year, &vessel)?;

    let against_min = deviation_percent(args.actual, bundle.minimum)?;
    let against_str = deviation_percent(args.actual, bundle.striving)?;

    println!("{}", crate::report::format_bundle(&bundle, &vessel, args.year));
    println!("Actual: {}", format_report(args.actual));
    println!("Deviation vs minimum : {}%", format_report(against_min));
    println!("Deviation vs striving: {}%", format_report(against_str));
    Ok(())
}
