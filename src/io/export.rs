//! Export batch deviation results to CSV / JSON.
//!
//! CSV is meant for spreadsheets (figures rounded to reporting precision);
//! JSON keeps full decimal precision (decimals serialize as strings).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::DeviationRow;
use crate::error::AppError;
use crate::math::format_report;

/// Write per-quarter deviation rows to a CSV file.
pub fn write_results_csv(path: &Path, rows: &[DeviationRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results_csv_to(BufWriter::new(file), rows)
}

pub fn write_results_csv_to<W: Write>(mut out: W, rows: &[DeviationRow]) -> Result<(), AppError> {
    let write_err = |e: std::io::Error| AppError::io(format!("Failed to write export CSV: {e}"));

    writeln!(
        out,
        "vessel_id,imo_no,vessel_type_id,date,actual_emission,baseline_emission,deviation_percentage"
    )
    .map_err(write_err)?;

    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            r.vessel_id,
            r.imo_no,
            r.vessel_type_id,
            r.date.format("%Y-%m-%d"),
            format_report(r.actual_emission),
            format_report(r.baseline_emission),
            r.deviation_percentage.map(format_report).unwrap_or_default(),
        )
        .map_err(write_err)?;
    }

    out.flush().map_err(write_err)
}

/// Write per-quarter deviation rows to a pretty-printed JSON file.
pub fn write_results_json(path: &Path, rows: &[DeviationRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)
        .map_err(|e| AppError::io(format!("Failed to write export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn rows() -> Vec<DeviationRow> {
        vec![
            DeviationRow {
                vessel_id: 1,
                imo_no: 9000001,
                vessel_type_id: 1001,
                date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                actual_emission: dec!(12),
                baseline_emission: dec!(3.180646839555),
                deviation_percentage: Some(dec!(277.281748189)),
            },
            DeviationRow {
                vessel_id: 2,
                imo_no: 9000002,
                vessel_type_id: 4242,
                date: Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap(),
                actual_emission: dec!(5.5),
                baseline_emission: dec!(0),
                deviation_percentage: None,
            },
        ]
    }

    #[test]
    fn csv_rounds_to_reporting_precision() {
        let mut buf = Vec::new();
        write_results_csv_to(&mut buf, &rows()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,9000001,1001,2024-02-01,12.00,3.18,277.28");
        assert_eq!(lines[2], "2,9000002,4242,2023-12-31,5.50,0.00,");
    }

    #[test]
    fn json_round_trips_full_precision() {
        let path = std::env::temp_dir().join(format!("vb-export-{}.json", std::process::id()));
        write_results_json(&path, &rows()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<DeviationRow> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, rows());
        std::fs::remove_file(&path).ok();
    }
}
