//! Reference-table and vessel-registry JSON readers.
//!
//! The reference table is loaded once per command and handed to every engine
//! call; nothing here is cached globally.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{ReferenceFactor, Vessel};
use crate::error::AppError;

/// Environment variable consulted when no reference path is given.
pub const REFERENCE_PATH_ENV: &str = "VB_REFERENCE_PATH";

/// Resolve the reference table path: explicit flag first, then `.env` / environment.
pub fn resolve_reference_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dotenvy::dotenv().ok();
    std::env::var(REFERENCE_PATH_ENV).map(PathBuf::from).map_err(|_| {
        AppError::invalid_input(
            "reference",
            format!("no --reference given and {REFERENCE_PATH_ENV} is not set (.env)"),
        )
    })
}

/// Load the reference factor table (a JSON array of rows).
pub fn load_reference_factors(path: &Path) -> Result<Vec<ReferenceFactor>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open reference table '{}': {e}", path.display())))?;
    let factors = read_reference_factors(BufReader::new(file))?;
    info!(path = %path.display(), rows = factors.len(), "loaded reference factors");
    Ok(factors)
}

/// Parse a reference factor table from any reader.
///
/// Non-numeric coefficients or a missing `VesselTypeID` reject the whole table.
pub fn read_reference_factors<R: Read>(reader: R) -> Result<Vec<ReferenceFactor>, AppError> {
    let factors: Vec<ReferenceFactor> = serde_json::from_reader(reader)
        .map_err(|e| AppError::invalid_input("reference table", e))?;

    let non_pp = factors.iter().filter(|f| !f.is_pp()).count();
    if non_pp > 0 {
        warn!(rows = non_pp, "reference rows without PP category");
    }
    Ok(factors)
}

/// Load the vessel registry (a JSON array of vessels).
pub fn load_vessels(path: &Path) -> Result<Vec<Vessel>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open vessel file '{}': {e}", path.display())))?;
    let vessels: Vec<Vessel> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::invalid_input("vessels", e))?;
    for v in &vessels {
        v.info()?;
    }
    Ok(vessels)
}
