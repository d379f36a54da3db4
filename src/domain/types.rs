//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - loaded from the reference table / vessel registry / emission exports
//! - passed by value through the baseline engine
//! - exported to JSON/CSV for downstream reporting

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Lower tolerance band factor, applied to the minimum baseline.
pub const LOWER_BAND_FACTOR: Decimal = dec!(0.33);

/// Upper tolerance band factor, applied to the minimum baseline.
pub const UPPER_BAND_FACTOR: Decimal = dec!(1.67);

/// Category marker carried by every usable reference row.
pub const PP_CATEGORY: &str = "PP";

/// Calibration curve a reference row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trajectory {
    /// Mandatory floor.
    Min,
    /// Voluntary, stricter target.
    Str,
}

impl Trajectory {
    /// Parse a raw `Traj` cell. Surrounding whitespace is ignored; anything other
    /// than `MIN` / `STR` is not a trajectory we compute.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "MIN" => Some(Trajectory::Min),
            "STR" => Some(Trajectory::Str),
            _ => None,
        }
    }
}

/// One calibration row of the reference table.
///
/// Field names on the wire follow the published table (`RowID`, `VesselTypeID`,
/// `Traj`, ...). Missing or `null` coefficients default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFactor {
    #[serde(rename = "RowID", default)]
    pub row_id: i64,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "VesselTypeID")]
    pub vessel_type_id: i64,
    #[serde(rename = "Size", default)]
    pub size: String,
    #[serde(rename = "Traj", default)]
    pub trajectory: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub a: Decimal,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub b: Decimal,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub c: Decimal,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub d: Decimal,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub e: Decimal,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ReferenceFactor {
    /// All-zero factor substituted for a missing trajectory row.
    ///
    /// Evaluates to a zero baseline for any year and deadweight.
    pub const fn neutral() -> Self {
        Self {
            row_id: 0,
            category: String::new(),
            vessel_type_id: 0,
            size: String::new(),
            trajectory: String::new(),
            a: Decimal::ZERO,
            b: Decimal::ZERO,
            c: Decimal::ZERO,
            d: Decimal::ZERO,
            e: Decimal::ZERO,
        }
    }

    pub fn trajectory_kind(&self) -> Option<Trajectory> {
        Trajectory::parse(&self.trajectory)
    }

    pub fn is_pp(&self) -> bool {
        self.category == PP_CATEGORY
    }
}

/// Vessel characteristics needed for a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselInfo {
    pub deadweight_tonnage: Decimal,
    pub vessel_type_id: i64,
}

impl VesselInfo {
    /// Build a vessel description, rejecting non-positive deadweight.
    pub fn new(deadweight_tonnage: Decimal, vessel_type_id: i64) -> Result<Self, AppError> {
        let info = Self {
            deadweight_tonnage,
            vessel_type_id,
        };
        info.validate()?;
        Ok(info)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.deadweight_tonnage <= Decimal::ZERO {
            return Err(AppError::invalid_input(
                "deadweight_tonnage",
                format!("must be positive, got {}", self.deadweight_tonnage),
            ));
        }
        Ok(())
    }
}

/// One reported emission reading.
///
/// `timestamp` is the end of the reporting period (`toUtc` in the source exports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub timestamp: DateTime<Utc>,
    /// Well-to-wake EEOI-type carbon intensity (`eeoico2ew2w`).
    pub actual_carbon_intensity: Decimal,
}

impl EmissionRecord {
    pub fn new(timestamp: DateTime<Utc>, actual_carbon_intensity: Decimal) -> Self {
        Self {
            timestamp,
            actual_carbon_intensity,
        }
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    pub fn quarter_key(&self) -> QuarterKey {
        QuarterKey::from_timestamp(&self.timestamp)
    }
}

/// Calendar quarter bucket (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuarterKey {
    pub year: i32,
    /// 1..=4
    pub quarter: u32,
}

impl QuarterKey {
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            quarter: ts.month0() / 3 + 1,
        }
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

/// Baselines for one vessel and year.
///
/// `lower_band` / `upper_band` are fixed multiples of `minimum`
/// ([`LOWER_BAND_FACTOR`], [`UPPER_BAND_FACTOR`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaselineBundle {
    pub minimum: Decimal,
    pub striving: Decimal,
    pub lower_band: Decimal,
    pub upper_band: Decimal,
}

impl BaselineBundle {
    /// Reported when the vessel type is unknown to the reference table.
    pub const ZERO: BaselineBundle = BaselineBundle {
        minimum: Decimal::ZERO,
        striving: Decimal::ZERO,
        lower_band: Decimal::ZERO,
        upper_band: Decimal::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        self.minimum.is_zero()
            && self.striving.is_zero()
            && self.lower_band.is_zero()
            && self.upper_band.is_zero()
    }
}

/// One point of a vessel's quarterly deviation series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyDeviation {
    pub quarter: QuarterKey,
    pub timestamp: DateTime<Utc>,
    pub actual: Decimal,
    pub baseline: BaselineBundle,
    /// Deviation against `baseline.minimum`; absent when that target is zero.
    pub min_deviation: Option<Decimal>,
    /// Deviation against `baseline.striving`; absent when that target is zero.
    pub striving_deviation: Option<Decimal>,
}

/// A vessel as held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub imo_no: i64,
    pub dwt: Decimal,
    pub vessel_type: i64,
}

impl Vessel {
    pub fn info(&self) -> Result<VesselInfo, AppError> {
        if self.dwt <= Decimal::ZERO {
            return Err(AppError::invalid_input(
                "dwt",
                format!("vessel IMO {} must have a positive deadweight, got {}", self.imo_no, self.dwt),
            ));
        }
        Ok(VesselInfo {
            deadweight_tonnage: self.dwt,
            vessel_type_id: self.vessel_type,
        })
    }
}

/// Flat per-quarter result row produced by a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationRow {
    pub vessel_id: i64,
    pub imo_no: i64,
    pub vessel_type_id: i64,
    pub date: DateTime<Utc>,
    pub actual_emission: Decimal,
    pub baseline_emission: Decimal,
    /// Absent when the baseline is zero.
    pub deviation_percentage: Option<Decimal>,
}

/// Latest-quarter deviation per vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSummary {
    pub vessel_id: i64,
    pub imo_no: i64,
    pub name: String,
    pub records: usize,
    pub quarters: usize,
    pub deviation: Decimal,
}

/// Configuration for a batch deviation run.
///
/// This is derived from CLI flags (plus `.env` defaults).
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub reference_path: PathBuf,
    pub vessels_path: PathBuf,
    pub emissions_path: PathBuf,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn trajectory_parse_trims_and_ignores_unknown() {
        assert_eq!(Trajectory::parse(" MIN "), Some(Trajectory::Min));
        assert_eq!(Trajectory::parse("STR\t"), Some(Trajectory::Str));
        assert_eq!(Trajectory::parse("min"), None);
        assert_eq!(Trajectory::parse("REF"), None);
    }

    #[test]
    fn quarter_key_buckets_by_month() {
        let q = |m| QuarterKey::from_timestamp(&Utc.with_ymd_and_hms(2024, m, 15, 0, 0, 0).unwrap());
        assert_eq!(q(1).quarter, 1);
        assert_eq!(q(3).quarter, 1);
        assert_eq!(q(4).quarter, 2);
        assert_eq!(q(9).quarter, 3);
        assert_eq!(q(12).quarter, 4);
        assert_eq!(q(12).to_string(), "2024-Q4");
    }

    #[test]
    fn vessel_info_rejects_non_positive_dwt() {
        assert!(VesselInfo::new(Decimal::ZERO, 1001).is_err());
        assert!(VesselInfo::new(dec!(-5), 1001).is_err());
        assert!(VesselInfo::new(dec!(100000), 1001).is_ok());
    }

    #[test]
    fn reference_factor_reads_table_naming() {
        let json = r#"{"RowID": 1, "Category": "PP", "VesselTypeID": 1001, "Size": "DWT",
                       "Traj": "MIN ", "a": 0.19759542325, "b": -1204.32747178827,
                       "c": 2446554.0444015, "d": -1656558770.18489, "e": -0.621795966623}"#;
        let f: ReferenceFactor = serde_json::from_str(json).unwrap();
        assert_eq!(f.vessel_type_id, 1001);
        assert_eq!(f.trajectory_kind(), Some(Trajectory::Min));
        assert!(f.is_pp());
        assert_eq!(f.d, dec!(-1656558770.18489));
        assert_eq!(f.e, dec!(-0.621795966623));
    }

    #[test]
    fn reference_factor_null_coefficients_read_as_zero() {
        let json = r#"{"VesselTypeID": 7, "Traj": "MIN", "a": null, "b": 2, "e": null}"#;
        let f: ReferenceFactor = serde_json::from_str(json).unwrap();
        assert!(f.a.is_zero());
        assert_eq!(f.b, dec!(2));
        assert!(f.e.is_zero());
    }

    #[test]
    fn category_must_match_exactly() {
        let mut f = ReferenceFactor::neutral();
        f.category = "PP".to_string();
        assert!(f.is_pp());
        f.category = " PP".to_string();
        assert!(!f.is_pp());
        f.category = "pp".to_string();
        assert!(!f.is_pp());
    }

    #[test]
    fn reference_factor_missing_coefficients_default_to_zero() {
        let json = r#"{"VesselTypeID": 7, "Traj": "STR", "a": 1.5}"#;
        let f: ReferenceFactor = serde_json::from_str(json).unwrap();
        assert_eq!(f.a, dec!(1.5));
        assert!(f.b.is_zero() && f.c.is_zero() && f.d.is_zero() && f.e.is_zero());
    }

    #[test]
    fn reference_factor_rejects_non_numeric_coefficient() {
        let json = r#"{"VesselTypeID": 7, "Traj": "STR", "a": "lots"}"#;
        assert!(serde_json::from_str::<ReferenceFactor>(json).is_err());
    }
}
