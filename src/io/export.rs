//! The combined actual + forecast table.
//!
//! One row per observation:
//!
//! ```text
//! date,inflation,type,lower_bound,upper_bound,horizon
//! 2025-01-01,14.0,actual,,,0
//! 2026-01-01,13.27,forecast,12.68,13.86,1
//! ```
//!
//! The export is meant to be easy to consume in charting tools and spreadsheets.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{InflationObservation, ObservationKind};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct ForecastRow {
    date: NaiveDate,
    inflation: f64,
    #[serde(rename = "type")]
    kind: ObservationKind,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    horizon: u32,
}

impl From<&InflationObservation> for ForecastRow {
    fn from(o: &InflationObservation) -> Self {
        Self {
            date: o.date,
            inflation: o.value,
            kind: o.kind,
            lower_bound: o.lower_bound,
            upper_bound: o.upper_bound,
            horizon: o.horizon,
        }
    }
}

impl From<ForecastRow> for InflationObservation {
    fn from(r: ForecastRow) -> Self {
        Self {
            date: r.date,
            value: r.inflation,
            kind: r.kind,
            lower_bound: r.lower_bound,
            upper_bound: r.upper_bound,
            horizon: r.horizon,
        }
    }
}

/// Write the combined series, creating parent directories as needed.
pub fn write_forecast_csv(path: &Path, rows: &[InflationObservation]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::input(format!("Failed to create '{}': {e}", parent.display())))?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(ForecastRow::from(row))
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = rows.len(), "wrote forecast table");
    Ok(())
}

/// Read a table previously produced by [`write_forecast_csv`].
pub fn read_forecast_csv(path: &Path) -> Result<Vec<InflationObservation>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open forecast CSV '{}': {e}", path.display())))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut out = Vec::new();
    for (idx, row) in reader.deserialize::<ForecastRow>().enumerate() {
        let row = row.map_err(|e| AppError::input(format!("Invalid forecast CSV row {}: {e}", idx + 2)))?;
        out.push(row.into());
    }
    out.sort_by_key(|o: &InflationObservation| o.date);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_round_trips_both_row_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("forecast.csv");
        let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let rows = vec![
            InflationObservation::actual(jan, 24.0),
            InflationObservation {
                date: feb,
                value: 23.5,
                kind: ObservationKind::Forecast,
                lower_bound: Some(22.9),
                upper_bound: Some(24.1),
                horizon: 1,
            },
        ];

        write_forecast_csv(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,inflation,type,lower_bound,upper_bound,horizon"));
        assert_eq!(lines.next(), Some("2025-01-01,24.0,actual,,,0"));

        assert_eq!(read_forecast_csv(&path).unwrap(), rows);
    }
}
