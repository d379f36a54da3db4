//! Reference-table lookup.
//!
//! The reference table is a flat list; a vessel type typically owns one `MIN`
//! and one `STR` row. Rows for other trajectories are ignored.

use crate::domain::{ReferenceFactor, Trajectory};

static NEUTRAL_FACTOR: ReferenceFactor = ReferenceFactor::neutral();

/// The MIN/STR rows selected for one vessel type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryFactors<'a> {
    pub min: Option<&'a ReferenceFactor>,
    pub striving: Option<&'a ReferenceFactor>,
}

impl<'a> TrajectoryFactors<'a> {
    /// MIN row, or the all-zero factor when the table has none.
    pub fn min_or_neutral(&self) -> &'a ReferenceFactor {
        self.min.unwrap_or(&NEUTRAL_FACTOR)
    }

    /// STR row, or the all-zero factor when the table has none.
    pub fn striving_or_neutral(&self) -> &'a ReferenceFactor {
        self.striving.unwrap_or(&NEUTRAL_FACTOR)
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.striving.is_none()
    }
}

/// Rows belonging to `vessel_type_id`, in table order.
pub fn factors_for_vessel_type(
    factors: &[ReferenceFactor],
    vessel_type_id: i64,
) -> impl Iterator<Item = &ReferenceFactor> {
    factors.iter().filter(move |f| f.vessel_type_id == vessel_type_id)
}

/// Whether any row for `vessel_type_id` carries the `PP` category.
pub fn has_pp_rows(factors: &[ReferenceFactor], vessel_type_id: i64) -> bool {
    factors_for_vessel_type(factors, vessel_type_id).any(ReferenceFactor::is_pp)
}

/// Pick the MIN and STR rows for a vessel type.
///
/// When the table repeats a trajectory for the same vessel type, the last row
/// wins.
pub fn select_trajectory_factors(factors: &[ReferenceFactor], vessel_type_id: i64) -> TrajectoryFactors<'_> {
    factors_for_vessel_type(factors, vessel_type_id).fold(TrajectoryFactors::default(), |mut acc, row| {
        match row.trajectory_kind() {
            Some(Trajectory::Min) => acc.min = Some(row),
            Some(Trajectory::Str) => acc.striving = Some(row),
            None => {}
        }
        acc
    })
}
