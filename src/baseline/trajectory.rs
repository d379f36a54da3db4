//! Trajectory aggregation: MIN + STR rows into a [`BaselineBundle`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::baseline::lookup::{has_pp_rows, select_trajectory_factors};
use crate::domain::{BaselineBundle, LOWER_BAND_FACTOR, ReferenceFactor, UPPER_BAND_FACTOR, VesselInfo};
use crate::error::AppError;
use crate::models::evaluate_baseline;

/// Build the tolerance band around a minimum baseline.
pub fn bundle_from(minimum: Decimal, striving: Decimal) -> Result<BaselineBundle, AppError> {
    let band = |factor: Decimal| {
        minimum
            .checked_mul(factor)
            .ok_or_else(|| AppError::arithmetic("tolerance band"))
    };
    Ok(BaselineBundle {
        minimum,
        striving,
        lower_band: band(LOWER_BAND_FACTOR)?,
        upper_band: band(UPPER_BAND_FACTOR)?,
    })
}

/// Compute the baseline bundle for a vessel in a given year.
///
/// Unknown vessel types (no `PP` row in the table) yield [`BaselineBundle::ZERO`].
/// A known type missing one of its trajectories gets zero for that trajectory only.
pub fn compute_baselines(
    factors: &[ReferenceFactor],
    year: i32,
    vessel: &VesselInfo,
) -> Result<BaselineBundle, AppError> {
    vessel.validate()?;

    if !has_pp_rows(factors, vessel.vessel_type_id) {
        debug!(vessel_type_id = vessel.vessel_type_id, "no PP reference rows; zero baselines");
        return Ok(BaselineBundle::ZERO);
    }

    let selected = select_trajectory_factors(factors, vessel.vessel_type_id);
    let minimum = evaluate_baseline(selected.min_or_neutral(), year, vessel.deadweight_tonnage)?;
    let striving = evaluate_baseline(selected.striving_or_neutral(), year, vessel.deadweight_tonnage)?;

    let bundle = bundle_from(minimum, striving)?;
    debug!(
        vessel_type_id = vessel.vessel_type_id,
        year,
        dwt = %vessel.deadweight_tonnage,
        minimum = %bundle.minimum,
        striving = %bundle.striving,
        "computed baselines"
    );
    Ok(bundle)
}

/// Baselines for every year in `years` (inclusive), in ascending year order.
pub fn compute_baseline_range(
    factors: &[ReferenceFactor],
    years: std::ops::RangeInclusive<i32>,
    vessel: &VesselInfo,
) -> Result<Vec<(i32, BaselineBundle)>, AppError> {
    years
        .map(|year| compute_baselines(factors, year, vessel).map(|b| (year, b)))
        .collect()
}
