//! Shared batch workflow used by the `batch` command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! reference table -> vessels -> emissions -> per-vessel series -> flat rows
//!
//! Vessels are independent, so they are evaluated in parallel. Output order is
//! input vessel order, then newest quarter first.

use rayon::prelude::*;
use tracing::info;

use crate::deviation::{latest_quarter_deviation, quarterly_deviation_series, quarterly_representatives};
use crate::domain::{BatchConfig, DeviationRow, EmissionRecord, ReferenceFactor, Vessel, VesselSummary};
use crate::error::AppError;
use crate::io::ingest::{IngestedEmissions, load_emissions};
use crate::io::reference::{load_reference_factors, load_vessels};

/// All computed outputs of a single `vb batch` run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub rows: Vec<DeviationRow>,
    pub summaries: Vec<VesselSummary>,
    /// IMO numbers of vessels that had no emission records.
    pub skipped: Vec<i64>,
}

/// Load every input named by `config` and run the batch.
pub fn run_batch(config: &BatchConfig) -> Result<BatchOutput, AppError> {
    let factors = load_reference_factors(&config.reference_path)?;
    let vessels = load_vessels(&config.vessels_path)?;
    let emissions = load_emissions(&config.emissions_path)?;
    info!(
        vessels = vessels.len(),
        records = emissions.rows.len(),
        skipped_rows = emissions.rows_skipped,
        "inputs loaded"
    );

    run_batch_with(&factors, &vessels, &emissions)
}

/// Run the batch over pre-loaded inputs.
pub fn run_batch_with(
    factors: &[ReferenceFactor],
    vessels: &[Vessel],
    emissions: &IngestedEmissions,
) -> Result<BatchOutput, AppError> {
    let by_vessel = emissions.by_vessel();

    let per_vessel: Vec<(Vec<DeviationRow>, VesselSummary)> = vessels
        .par_iter()
        .map(|vessel| {
            let records = by_vessel.get(&vessel.imo_no).map(Vec::as_slice).unwrap_or(&[]);
            evaluate_vessel(factors, vessel, records)
        })
        .collect::<Result<_, AppError>>()?;

    let mut out = BatchOutput {
        rows: Vec::new(),
        summaries: Vec::with_capacity(per_vessel.len()),
        skipped: Vec::new(),
    };
    for (rows, summary) in per_vessel {
        if summary.records == 0 {
            out.skipped.push(summary.imo_no);
        }
        out.rows.extend(rows);
        out.summaries.push(summary);
    }
    Ok(out)
}

fn evaluate_vessel(
    factors: &[ReferenceFactor],
    vessel: &Vessel,
    records: &[EmissionRecord],
) -> Result<(Vec<DeviationRow>, VesselSummary), AppError> {
    let info = vessel.info()?;

    if records.is_empty() {
        info!(imo = vessel.imo_no, "no emissions data; skipping");
    } else {
        info!(imo = vessel.imo_no, records = records.len(), "processing vessel");
    }

    let series = quarterly_deviation_series(records, &info, factors)?;
    let deviation = latest_quarter_deviation(records, &info, factors)?;

    let rows = series
        .iter()
        .map(|point| DeviationRow {
            vessel_id: vessel.id,
            imo_no: vessel.imo_no,
            vessel_type_id: vessel.vessel_type,
            date: point.timestamp,
            actual_emission: point.actual,
            baseline_emission: point.baseline.minimum,
            deviation_percentage: point.min_deviation,
        })
        .collect();

    let summary = VesselSummary {
        vessel_id: vessel.id,
        imo_no: vessel.imo_no,
        name: vessel.name.clone(),
        records: records.len(),
        quarters: quarterly_representatives(records).len(),
        deviation,
    };

    Ok((rows, summary))
}
