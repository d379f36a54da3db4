//! Deviation of actual carbon intensity from a baseline target.
//!
//! ```text
//! deviation = (actual - target) / target × 100
//! ```
//!
//! Positive means worse than target, negative means better.
//!
//! A zero target is handled differently by the two forms:
//! - the single-value form ([`deviation_percent`]) reports `0`
//! - the series form ([`series_deviation`]) reports `None`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::baseline::compute_baselines;
use crate::deviation::quarterly::quarterly_representatives;
use crate::domain::{EmissionRecord, QuarterlyDeviation, ReferenceFactor, VesselInfo};
use crate::error::AppError;

fn checked_deviation(actual: Decimal, target: Decimal) -> Result<Decimal, AppError> {
    actual
        .checked_sub(target)
        .and_then(|gap| gap.checked_div(target))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| AppError::arithmetic("deviation"))
}

fn ensure_actual(actual: Decimal) -> Result<(), AppError> {
    if actual.is_sign_negative() && !actual.is_zero() {
        return Err(AppError::invalid_input(
            "actual_carbon_intensity",
            format!("must be non-negative, got {actual}"),
        ));
    }
    Ok(())
}

/// Single-value deviation in percent. A zero target yields `0`.
pub fn deviation_percent(actual: Decimal, target: Decimal) -> Result<Decimal, AppError> {
    ensure_actual(actual)?;
    if target.is_zero() {
        return Ok(Decimal::ZERO);
    }
    checked_deviation(actual, target)
}

/// Series deviation in percent. A zero target yields `None`.
pub fn series_deviation(actual: Decimal, target: Decimal) -> Result<Option<Decimal>, AppError> {
    ensure_actual(actual)?;
    if target.is_zero() {
        return Ok(None);
    }
    checked_deviation(actual, target).map(Some)
}

/// Deviation of the most recent quarterly reading against its year's minimum baseline.
///
/// An empty history (or a zero baseline) reports `0`.
pub fn latest_quarter_deviation(
    records: &[EmissionRecord],
    vessel: &VesselInfo,
    factors: &[ReferenceFactor],
) -> Result<Decimal, AppError> {
    let representatives = quarterly_representatives(records);
    let Some(latest) = representatives.first() else {
        return Ok(Decimal::ZERO);
    };

    let baselines = compute_baselines(factors, latest.year(), vessel)?;
    let deviation = deviation_percent(latest.actual_carbon_intensity, baselines.minimum)?;

    debug!(
        date = %latest.timestamp,
        actual = %latest.actual_carbon_intensity,
        baseline_min = %baselines.minimum,
        deviation = %deviation,
        "latest quarter deviation"
    );
    Ok(deviation)
}

/// Per-quarter deviations against both trajectories, newest quarter first.
pub fn quarterly_deviation_series(
    records: &[EmissionRecord],
    vessel: &VesselInfo,
    factors: &[ReferenceFactor],
) -> Result<Vec<QuarterlyDeviation>, AppError> {
    quarterly_representatives(records)
        .into_iter()
        .map(|record| {
            let baseline = compute_baselines(factors, record.year(), vessel)?;
            let actual = record.actual_carbon_intensity;
            Ok(QuarterlyDeviation {
                quarter: record.quarter_key(),
                timestamp: record.timestamp,
                actual,
                baseline,
                min_deviation: series_deviation(actual, baseline.minimum)?,
                striving_deviation: series_deviation(actual, baseline.striving)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn table() -> Vec<ReferenceFactor> {
        vec![
            ReferenceFactor {
                row_id: 1,
                category: "PP".to_string(),
                vessel_type_id: 1001,
                size: "DWT".to_string(),
                trajectory: "MIN".to_string(),
                a: dec!(0.19759542325),
                b: dec!(-1204.32747178827),
                c: dec!(2446554.0444015),
                d: dec!(-1656558770.18489),
                e: dec!(-0.621795966623),
            },
            ReferenceFactor {
                row_id: 4,
                category: "PP".to_string(),
                vessel_type_id: 1001,
                size: "DWT".to_string(),
                trajectory: "STR".to_string(),
                a: dec!(0.171970561295),
                b: dec!(-1046.38418984716),
                c: dec!(2122087.93600504),
                d: dec!(-1434398489.01475),
                e: dec!(-0.621795966623),
            },
        ]
    }

    fn bulk() -> VesselInfo {
        VesselInfo::new(dec!(100000), 1001).unwrap()
    }

    fn rec(y: i32, m: u32, d: u32, v: Decimal) -> EmissionRecord {
        EmissionRecord::new(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(), v)
    }

    #[test]
    fn sign_convention() {
        assert_eq!(deviation_percent(dec!(12), dec!(10)).unwrap(), dec!(20));
        assert_eq!(deviation_percent(dec!(8), dec!(10)).unwrap(), dec!(-20));
        assert_eq!(deviation_percent(dec!(10), dec!(10)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn zero_target_single_value_is_zero() {
        assert_eq!(deviation_percent(dec!(12), Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(deviation_percent(Decimal::ZERO, Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn zero_target_series_is_none() {
        assert_eq!(series_deviation(dec!(12), Decimal::ZERO).unwrap(), None);
        assert_eq!(series_deviation(dec!(15), dec!(10)).unwrap(), Some(dec!(50)));
    }

    #[test]
    fn negative_actual_is_invalid_input() {
        let err = deviation_percent(dec!(-1), dec!(10)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn latest_quarter_uses_latest_reading_only() {
        let records = vec![rec(2024, 1, 1, dec!(10)), rec(2024, 2, 1, dec!(12))];
        let dev = latest_quarter_deviation(&records, &bulk(), &table()).unwrap();
        // (12 - 3.18064684) / 3.18064684 × 100 ≈ 277.28
        assert!((dev - dec!(277.2817481893)).abs() < dec!(0.0001), "got {dev}");
        assert!(dev > Decimal::ZERO);
    }

    #[test]
    fn empty_history_reports_zero() {
        let dev = latest_quarter_deviation(&[], &bulk(), &table()).unwrap();
        assert_eq!(dev, Decimal::ZERO);
    }

    #[test]
    fn missing_factors_report_zero() {
        let records = vec![rec(2024, 1, 1, dec!(10)), rec(2024, 2, 1, dec!(12))];
        let dev = latest_quarter_deviation(&records, &bulk(), &[]).unwrap();
        assert_eq!(dev, Decimal::ZERO);
    }

    #[test]
    fn series_has_one_point_per_quarter_with_both_trajectories() {
        let records = vec![
            rec(2023, 12, 31, dec!(3.5)),
            rec(2024, 1, 1, dec!(10)),
            rec(2024, 2, 1, dec!(2.5)),
        ];
        let series = quarterly_deviation_series(&records, &bulk(), &table()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].quarter.to_string(), "2024-Q1");
        assert_eq!(series[1].quarter.to_string(), "2023-Q4");

        // 2.5 is below both 2024 targets.
        assert!(series[0].min_deviation.unwrap() < Decimal::ZERO);
        assert!(series[0].striving_deviation.unwrap() < Decimal::ZERO);
        // The 2023 point is evaluated against the 2023 baseline.
        assert!(series[1].baseline.minimum > series[0].baseline.minimum);
    }

    #[test]
    fn series_for_unknown_type_has_no_deviations() {
        let records = vec![rec(2024, 2, 1, dec!(12))];
        let vessel = VesselInfo::new(dec!(100000), 4242).unwrap();
        let series = quarterly_deviation_series(&records, &vessel, &table()).unwrap();
        assert_eq!(series.len(), 1);
        assert!(series[0].baseline.is_zero());
        assert_eq!(series[0].min_deviation, None);
        assert_eq!(series[0].striving_deviation, None);
    }
}
