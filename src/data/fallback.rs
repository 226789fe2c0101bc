//! Built-in series used only when the caller opts in.

use chrono::NaiveDate;

use crate::domain::{InflationObservation, SentimentObservation};

/// Annual headline inflation (percent), dated January 1st.
const ANNUAL_INFLATION: [(i32, f64); 6] = [
    (2020, 5.7),
    (2021, 5.2),
    (2022, 8.5),
    (2023, 24.0),
    (2024, 28.3),
    (2025, 14.0),
];

pub fn fallback_inflation() -> Vec<InflationObservation> {
    ANNUAL_INFLATION
        .iter()
        .filter_map(|&(year, value)| {
            NaiveDate::from_ymd_opt(year, 1, 1).map(|date| InflationObservation::actual(date, value))
        })
        .collect()
}

/// A single sentiment point at `date` with the configured neutral-ish score.
pub fn fallback_sentiment(date: NaiveDate, score: f64) -> Vec<SentimentObservation> {
    vec![SentimentObservation { date, score }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_inflation_is_sorted_annual() {
        let series = fallback_inflation();
        assert_eq!(series.len(), 6);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series.last().map(|o| o.value), Some(14.0));
    }
}
