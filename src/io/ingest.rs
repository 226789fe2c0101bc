//! CSV ingest of a local inflation series.
//!
//! Expected columns: `date` and `inflation` (or `value`); an optional `type`
//! column lets a previous forecast export be fed back in, in which case only
//! `actual` rows are kept.
//!
//! A missing required column is an input error (exit code 2); bad rows are
//! skipped and reported as `RowError`s.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::warn;

use crate::domain::{Frequency, InflationObservation, ObservationKind};
use crate::error::AppError;
use crate::series::period_start;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: actual observations plus what was skipped.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub observations: Vec<InflationObservation>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Forecast rows ignored because they are not history.
    pub forecast_rows: usize,
}

pub fn load_inflation_csv(path: &Path, frequency: Frequency) -> Result<IngestedSeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_inflation_csv(file, frequency)?;

    for err in &ingested.row_errors {
        warn!(line = err.line, "{}", err.message);
    }
    Ok(ingested)
}

pub fn read_inflation_csv<R: std::io::Read>(reader: R, frequency: Frequency) -> Result<IngestedSeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?;
    let columns = Columns::locate(headers)?;

    let mut out = IngestedSeries {
        observations: Vec::new(),
        row_errors: Vec::new(),
        rows_read: 0,
        forecast_rows: 0,
    };

    for (idx, result) in reader.records().enumerate() {
        // +2: header line plus 1-based numbering.
        let line = idx + 2;
        out.rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| columns.parse(&record));
        match parsed {
            Ok((ObservationKind::Forecast, ..)) => out.forecast_rows += 1,
            Ok((ObservationKind::Actual, date, value)) => out
                .observations
                .push(InflationObservation::actual(period_start(date, frequency), value)),
            Err(message) => out.row_errors.push(RowError { line, message }),
        }
    }

    if out.observations.is_empty() {
        return Err(AppError::data("No valid inflation rows found in CSV."));
    }
    out.observations.sort_by_key(|o| o.date);
    Ok(out)
}

/// Column positions resolved once from the header row.
struct Columns {
    date: usize,
    value: usize,
    value_name: &'static str,
    kind: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, AppError> {
        // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
        let position = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
        };

        let date = position("date").ok_or_else(|| AppError::input("Missing required column: `date`"))?;
        let (value_name, value) = ["inflation", "value"]
            .into_iter()
            .find_map(|name| position(name).map(|idx| (name, idx)))
            .ok_or_else(|| AppError::input("Missing required column: `inflation` (or `value`)"))?;

        Ok(Self {
            date,
            value,
            value_name,
            kind: position("type"),
        })
    }

    fn parse(&self, record: &StringRecord) -> Result<(ObservationKind, NaiveDate, f64), String> {
        let field = |idx: usize| record.get(idx).filter(|s| !s.is_empty());

        let kind = match self.kind.and_then(field) {
            Some(raw) => ObservationKind::parse(raw).ok_or_else(|| format!("Unknown row type `{raw}`."))?,
            None => ObservationKind::Actual,
        };
        let date = field(self.date).ok_or("Missing required value: `date`")?;
        let date = parse_date(date)?;
        let value = field(self.value)
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("Missing/invalid `{}` value.", self.value_name))?;
        Ok((kind, date, value))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO first; `YYYY-MM` is common for monthly statistics.
    if let Some(d) = crate::series::parse_date_prefix(s) {
        return Ok(d);
    }
    ["%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"]
        .into_iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok())
        .ok_or_else(|| format!("Invalid date `{s}`."))
}
