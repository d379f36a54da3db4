//! Quarterly down-sampling of an emission history.
//!
//! Vessels report at irregular frequencies. To keep deviations comparable we
//! keep exactly one reading per calendar quarter: the latest one.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{EmissionRecord, QuarterKey};

/// Pick the latest record of each calendar quarter, newest quarter first.
///
/// Ties on timestamp within a quarter keep the first record encountered.
pub fn quarterly_representatives(records: &[EmissionRecord]) -> Vec<&EmissionRecord> {
    let mut latest: HashMap<QuarterKey, &EmissionRecord> = HashMap::new();

    for record in records {
        latest
            .entry(record.quarter_key())
            .and_modify(|current| {
                if record.timestamp > current.timestamp {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    let mut out: Vec<&EmissionRecord> = latest.into_values().collect();
    out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    for r in &out {
        debug!(
            quarter = %r.quarter_key(),
            date = %r.timestamp,
            value = %r.actual_carbon_intensity,
            "quarterly representative"
        );
    }

    out
}
