//! Aligning the inflation and sentiment series.
//!
//! The inflation calendar drives the merge (left join). Each period takes the
//! sentiment of the nearest known period at or before it, else the earliest one
//! after it, so every merged row carries a sentiment value. Sentiment periods
//! outside the calendar still count as known values.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Frequency, InflationObservation, SentimentObservation};
use crate::series::calendar::period_start;

/// One period of the merged history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedPoint {
    pub date: NaiveDate,
    pub inflation: f64,
    pub sentiment: f64,
}

/// Sort actual observations by date and keep one row per period (last wins).
///
/// Forecast rows are dropped; they are never history.
pub fn normalize_actuals(observations: &[InflationObservation], frequency: Frequency) -> Vec<InflationObservation> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations.iter().filter(|o| !o.is_forecast()) {
        by_date.insert(period_start(obs.date, frequency), obs.value);
    }
    by_date
        .into_iter()
        .map(|(date, value)| InflationObservation::actual(date, value))
        .collect()
}

/// Keep observations whose period starts on or before the period of `as_of`.
///
/// Returns the kept rows and how many later rows were dropped.
pub fn drop_after(
    observations: &[InflationObservation],
    as_of: NaiveDate,
    frequency: Frequency,
) -> (Vec<InflationObservation>, usize) {
    let cutoff = period_start(as_of, frequency);
    let (kept, later): (Vec<_>, Vec<_>) = observations
        .iter()
        .cloned()
        .partition(|o| period_start(o.date, frequency) <= cutoff);
    (kept, later.len())
}

/// Left-join sentiment onto the inflation calendar.
///
/// `fallback_sentiment` is used only when `sentiment` is empty.
pub fn merge_series(
    inflation: &[InflationObservation],
    sentiment: &[SentimentObservation],
    frequency: Frequency,
    fallback_sentiment: f64,
) -> Vec<MergedPoint> {
    let actuals = normalize_actuals(inflation, frequency);

    let mut sentiment_by_period: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for s in sentiment {
        sentiment_by_period.insert(period_start(s.date, frequency), s.score);
    }

    let matched = actuals
        .iter()
        .filter(|obs| sentiment_by_period.contains_key(&obs.date))
        .count();
    debug!(
        periods = actuals.len(),
        sentiment_periods = sentiment_by_period.len(),
        matched,
        "joined sentiment onto inflation calendar"
    );

    actuals
        .iter()
        .map(|obs| MergedPoint {
            date: obs.date,
            inflation: obs.value,
            sentiment: nearest_known(&sentiment_by_period, obs.date).unwrap_or(fallback_sentiment),
        })
        .collect()
}

/// Latest value at or before `date`, else the earliest value after it.
fn nearest_known(by_period: &BTreeMap<NaiveDate, f64>, date: NaiveDate) -> Option<f64> {
    by_period
        .range(..=date)
        .next_back()
        .or_else(|| by_period.range(date..).next())
        .map(|(_, score)| *score)
}

/// Append forecasts to the history and re-sort by date.
pub fn append_forecasts(
    history: &[InflationObservation],
    forecasts: &[InflationObservation],
) -> Vec<InflationObservation> {
    let mut combined: Vec<InflationObservation> = history.iter().chain(forecasts.iter()).cloned().collect();
    combined.sort_by_key(|o| o.date);
    combined
}
