//! Terminal formatting for baselines, deviation series and batch results.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized
//!
//! Every figure is shown at reporting precision (2dp).

use rust_decimal::Decimal;

use crate::domain::{BaselineBundle, DeviationRow, QuarterlyDeviation, VesselInfo, VesselSummary};
use crate::math::format_report;

/// Format one baseline bundle.
pub fn format_bundle(bundle: &BaselineBundle, vessel: &VesselInfo, year: i32) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Vessel type {} | DWT {} | year {}\n",
        vessel.vessel_type_id, vessel.deadweight_tonnage, year
    ));
    if bundle.is_zero() {
        out.push_str("(no reference rows for this vessel type; baselines reported as zero)\n");
    }
    out.push_str(&format!("  minimum   : {:>10}\n", format_report(bundle.minimum)));
    out.push_str(&format!("  striving  : {:>10}\n", format_report(bundle.striving)));
    out.push_str(&format!(
        "  band      : [{}, {}]\n",
        format_report(bundle.lower_band),
        format_report(bundle.upper_band)
    ));
    out
}

/// Format baselines over a range of years.
pub fn format_baseline_table(rows: &[(i32, BaselineBundle)]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:>10} {:>10} {:>10} {:>10}\n",
        "year", "minimum", "striving", "lower", "upper"
    ));
    out.push_str(&format!("{:-<6} {:-<10} {:-<10} {:-<10} {:-<10}\n", "", "", "", "", ""));
    for (year, b) in rows {
        out.push_str(&format!(
            "{:<6} {:>10} {:>10} {:>10} {:>10}\n",
            year,
            format_report(b.minimum),
            format_report(b.striving),
            format_report(b.lower_band),
            format_report(b.upper_band),
        ));
    }
    out
}

/// Format a per-quarter deviation series (newest first).
pub fn format_series(series: &[QuarterlyDeviation]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:<10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "quarter", "date", "actual", "min", "str", "dev_min%", "dev_str%"
    ));
    out.push_str(&format!(
        "{:-<8} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", ""
    ));
    for p in series {
        out.push_str(&format!(
            "{:<8} {:<10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            p.quarter.to_string(),
            p.timestamp.format("%Y-%m-%d").to_string(),
            format_report(p.actual),
            format_report(p.baseline.minimum),
            format_report(p.baseline.striving),
            fmt_opt(p.min_deviation),
            fmt_opt(p.striving_deviation),
        ));
    }
    out
}

/// Format the latest-quarter deviation line.
pub fn format_latest_deviation(deviation: Decimal) -> String {
    format!("Latest quarter deviation: {}%", format_report(deviation))
}

/// Format batch results, one block per row.
pub fn format_batch_rows(rows: &[DeviationRow]) -> String {
    let mut out = String::new();
    out.push_str("Deviation Results:\n");
    out.push_str("=================\n");
    for r in rows {
        out.push_str(&format!("\nVessel IMO: {}\n", r.imo_no));
        out.push_str(&format!("Date: {}\n", r.date.format("%Y-%m-%d")));
        out.push_str(&format!("Vessel Type: {}\n", r.vessel_type_id));
        out.push_str(&format!("Actual Emission: {}\n", format_report(r.actual_emission)));
        out.push_str(&format!("Baseline Emission: {}\n", format_report(r.baseline_emission)));
        out.push_str(&format!("Deviation: {}%\n", fmt_opt(r.deviation_percentage)));
        out.push_str("-------------------\n");
    }
    out
}

/// Format per-vessel latest deviations.
pub fn format_summaries(summaries: &[VesselSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>10} {:>8} {:>8} {:>10}\n",
        "vessel", "imo", "records", "quarters", "dev%"
    ));
    out.push_str(&format!("{:-<24} {:-<10} {:-<8} {:-<8} {:-<10}\n", "", "", "", "", ""));
    for s in summaries {
        out.push_str(&format!(
            "{:<24} {:>10} {:>8} {:>8} {:>10}\n",
            truncate(&s.name, 24),
            s.imo_no,
            s.records,
            s.quarters,
            format_report(s.deviation),
        ));
    }
    out
}

fn fmt_opt(v: Option<Decimal>) -> String {
    v.map(format_report).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
