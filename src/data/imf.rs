//! IMF DataMapper API integration for annual inflation.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::InflationObservation;
use crate::error::AppError;

const BASE_URL: &str = "https://www.imf.org/external/datamapper/api/v1";

/// Consumer prices, annual percent change.
pub const DEFAULT_INDICATOR: &str = "PCPIPCH";
pub const DEFAULT_COUNTRY: &str = "EGY";
pub const DEFAULT_MIN_YEAR: i32 = 2020;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ImfClient {
    client: Client,
    base_url: String,
}

impl ImfClient {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::data(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different DataMapper-compatible host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one indicator for one country, keeping years from `min_year`
    /// through the year of `as_of`.
    ///
    /// Each year becomes an actual observation dated January 1st.
    pub fn fetch_series(
        &self,
        indicator: &str,
        country: &str,
        min_year: i32,
        as_of: NaiveDate,
    ) -> Result<Vec<InflationObservation>, AppError> {
        let url = format!("{}/{indicator}/{country}", self.base_url.trim_end_matches('/'));
        debug!(%url, "requesting IMF series");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::data(format!("IMF request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "IMF request failed with status {}.",
                resp.status()
            )));
        }

        let body: DataMapperResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse IMF response: {e}")))?;

        let series = series_from_response(&body, indicator, country, min_year, as_of)?;
        info!(indicator, country, years = series.len(), "loaded IMF inflation series");
        Ok(series)
    }
}

/// `{"values": {INDICATOR: {COUNTRY: {"YYYY": value | null}}}}`
#[derive(Debug, Deserialize)]
pub struct DataMapperResponse {
    #[serde(default)]
    values: HashMap<String, HashMap<String, BTreeMap<String, Option<f64>>>>,
}

/// Extract `[min_year, as_of.year()]` from a DataMapper body.
///
/// DataMapper also publishes IMF projections for future years; those are not
/// history and are dropped.
pub fn series_from_response(
    body: &DataMapperResponse,
    indicator: &str,
    country: &str,
    min_year: i32,
    as_of: NaiveDate,
) -> Result<Vec<InflationObservation>, AppError> {
    let by_year = body
        .values
        .get(indicator)
        .and_then(|countries| countries.get(country))
        .ok_or_else(|| AppError::data(format!("IMF response has no values for {indicator}/{country}.")))?;

    let mut out = Vec::new();
    let mut projections = 0usize;
    for (year, value) in by_year {
        let Some(value) = (*value).filter(|v| v.is_finite()) else {
            continue;
        };
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|e| AppError::data(format!("Invalid IMF year '{year}': {e}")))?;
        if year < min_year {
            continue;
        }
        if year > as_of.year() {
            projections += 1;
            continue;
        }
        let date = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::data(format!("IMF year {year} is out of range.")))?;
        out.push(InflationObservation::actual(date, value));
    }

    if projections > 0 {
        debug!(projections, %as_of, "dropped IMF projection years");
    }
    if out.is_empty() {
        return Err(AppError::data(format!(
            "IMF returned no usable observations for {indicator}/{country} between {min_year} and {}.",
            as_of.year()
        )));
    }
    out.sort_by_key(|o| o.date);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "values": {"PCPIPCH": {"EGY": {
            "2018": 20.9, "2019": 13.9, "2020": 5.7, "2021": 4.5,
            "2022": 8.5, "2023": 24.4, "2024": 33.3, "2025": null
        }}},
        "api": {"version": "1", "output-method": "json"}
    }"#;

    fn as_of(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_and_filters_years() {
        let body: DataMapperResponse = serde_json::from_str(BODY).unwrap();
        let series = series_from_response(&body, "PCPIPCH", "EGY", 2020, as_of(2025, 6, 30)).unwrap();

        let years: Vec<String> = series.iter().map(|o| o.date.format("%Y").to_string()).collect();
        assert_eq!(years, vec!["2020", "2021", "2022", "2023", "2024"]);
        assert_eq!(series[3].value, 24.4);
        assert!(series.iter().all(|o| !o.is_forecast() && o.horizon == 0));
    }

    #[test]
    fn missing_country_is_a_data_error() {
        let body: DataMapperResponse = serde_json::from_str(BODY).unwrap();
        let err = series_from_response(&body, "PCPIPCH", "USA", 2020, as_of(2025, 6, 30)).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn all_null_values_are_a_data_error() {
        let body: DataMapperResponse =
            serde_json::from_str(r#"{"values": {"PCPIPCH": {"EGY": {"2025": null}}}}"#).unwrap();
        assert!(series_from_response(&body, "PCPIPCH", "EGY", 2020, as_of(2025, 6, 30)).is_err());
    }

    #[test]
    fn projection_years_after_as_of_are_dropped() {
        let body: DataMapperResponse = serde_json::from_str(
            r#"{"values": {"PCPIPCH": {"EGY": {
                "2024": 33.3, "2025": 20.9, "2026": 12.5, "2027": 10.2, "2030": 6.5
            }}}}"#,
        )
        .unwrap();

        let series = series_from_response(&body, "PCPIPCH", "EGY", 2020, as_of(2025, 11, 3)).unwrap();
        let years: Vec<i32> = series.iter().map(|o| o.date.year()).collect();
        assert_eq!(years, vec![2024, 2025]);
        assert!(series.iter().all(|o| !o.is_forecast()));

        let err = series_from_response(&body, "PCPIPCH", "EGY", 2020, as_of(2023, 1, 1)).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
