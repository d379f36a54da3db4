//! Emission CSV ingest and normalization.
//!
//! Turns an emission export into clean [`EmissionRecord`]s, optionally keyed by
//! vessel IMO number.
//!
//! Design goals:
//! - **Strict schema** for required fields (clear errors naming the line)
//! - **Null readings are skipped**, not treated as zero
//! - **Separation of concerns**: no baseline logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::domain::EmissionRecord;
use crate::error::AppError;

const COL_VESSEL: &str = "vessel_imo";
const COL_TIMESTAMP: &str = "to_utc";
const COL_INTENSITY: &str = "eeoico2ew2w";

/// One normalized CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionRow {
    pub vessel_imo: Option<i64>,
    pub record: EmissionRecord,
}

/// Ingest output: normalized rows plus simple counters.
#[derive(Debug, Clone, Default)]
pub struct IngestedEmissions {
    pub rows: Vec<EmissionRow>,
    pub rows_read: usize,
    /// Rows dropped because the intensity cell was present but blank.
    pub rows_skipped: usize,
}

impl IngestedEmissions {
    /// Every record in file order, regardless of vessel.
    pub fn all_records(&self) -> Vec<EmissionRecord> {
        self.rows.iter().map(|r| r.record.clone()).collect()
    }

    /// Records tagged with `imo_no`, in file order.
    pub fn records_for(&self, imo_no: i64) -> Vec<EmissionRecord> {
        self.rows
            .iter()
            .filter(|r| r.vessel_imo == Some(imo_no))
            .map(|r| r.record.clone())
            .collect()
    }

    /// Records grouped by vessel IMO (untagged rows are dropped).
    pub fn by_vessel(&self) -> HashMap<i64, Vec<EmissionRecord>> {
        let mut out: HashMap<i64, Vec<EmissionRecord>> = HashMap::new();
        for row in &self.rows {
            if let Some(imo) = row.vessel_imo {
                out.entry(imo).or_default().push(row.record.clone());
            }
        }
        out
    }
}

/// Load an emission CSV from disk.
pub fn load_emissions(path: &Path) -> Result<IngestedEmissions, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open emission CSV '{}': {e}", path.display())))?;
    load_emissions_from_reader(file)
}

/// Load an emission CSV from any reader.
pub fn load_emissions_from_reader<R: Read>(reader: R) -> Result<IngestedEmissions, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for required in [COL_TIMESTAMP, COL_INTENSITY] {
        if !header_map.contains_key(required) {
            return Err(AppError::invalid_input(required, "missing required column"));
        }
    }

    let mut out = IngestedEmissions::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based.
        let line = idx + 2;
        out.rows_read += 1;

        let record = result.map_err(|e| AppError::invalid_input("csv", format!("line {line}: {e}")))?;
        if record.len() < headers.len() {
            return Err(AppError::invalid_input(
                "csv",
                format!("line {line}: expected {} fields, found {}", headers.len(), record.len()),
            ));
        }
        match parse_row(&record, &header_map).map_err(|(field, msg)| {
            AppError::invalid_input(field, format!("line {line}: {msg}"))
        })? {
            Some(row) => out.rows.push(row),
            None => out.rows_skipped += 1,
        }
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<Option<EmissionRow>, (&'static str, String)> {
    let Some(raw_intensity) = get_optional(record, header_map, COL_INTENSITY) else {
        return Ok(None);
    };

    let raw_ts = get_optional(record, header_map, COL_TIMESTAMP)
        .ok_or((COL_TIMESTAMP, "missing timestamp".to_string()))?;
    let timestamp = parse_timestamp(raw_ts).map_err(|e| (COL_TIMESTAMP, e))?;

    let intensity = parse_decimal(raw_intensity).map_err(|e| (COL_INTENSITY, e))?;
    if intensity < Decimal::ZERO {
        return Err((COL_INTENSITY, format!("must be non-negative, got {intensity}")));
    }

    let vessel_imo = match get_optional(record, header_map, COL_VESSEL) {
        Some(s) => Some(
            s.parse::<i64>()
                .map_err(|_| (COL_VESSEL, format!("invalid IMO number '{s}'")))?,
        ),
        None => None,
    };

    Ok(Some(EmissionRow {
        vessel_imo,
        record: EmissionRecord::new(timestamp, intensity),
    }))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a period-end timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    const DATETIME_FMTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in DATETIME_FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected RFC 3339, YYYY-MM-DD HH:MM:SS, or YYYY-MM-DD."
    ))
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| format!("Invalid number '{s}'"))
}
