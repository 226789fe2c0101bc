//! Formatted terminal output.
//!
//! We keep formatting code in one place so the forecasting code stays clean and
//! output changes are localized.

use crate::domain::{ForecastConfig, InflationObservation};
use crate::forecast::ForecastBreakdown;
use crate::sentiment::SentimentSummary;

/// Header, model constants and the step-1 breakdown.
pub fn format_run_summary(
    source: &str,
    history: &[InflationObservation],
    breakdown: &ForecastBreakdown,
    config: &ForecastConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== infl - Inflation Forecast ===\n");
    out.push_str(&format!("Source: {source}\n"));
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        out.push_str(&format!(
            "History: n={} | {} .. {} (per {})\n",
            history.len(),
            first.date,
            last.date,
            config.frequency.label()
        ));
    }
    out.push_str(&format!(
        "Mode: {:?} | horizon={} | lags: sentiment={} inflation={}\n",
        config.mode,
        config.horizon,
        config.params.sentiment_lags(),
        config.params.inflation_lags()
    ));

    out.push_str("\nForecast breakdown (step 1):\n");
    out.push_str(&format!("  Sentiment effect:   {:>7.2} pp\n", breakdown.sentiment_effect));
    out.push_str(&format!("  Inflation momentum: {:>7.2} pp\n", breakdown.inflation_momentum));
    out.push_str(&format!("  Intercept:          {:>7.2} pp\n", breakdown.intercept));
    out.push_str("  ----------------------------\n");
    out.push_str(&format!("  Forecast:           {:>7.2} %\n", breakdown.value));
    out.push('\n');

    out
}

/// Table of forecast rows with bounds.
pub fn format_forecast_table(forecasts: &[InflationObservation]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10}  {:>2}  {:>8}  {:>8}  {:>8}\n",
        "date", "h", "value", "lower", "upper"
    ));
    for f in forecasts {
        out.push_str(&format!(
            "{:<10}  {:>2}  {:>8.2}  {:>8}  {:>8}\n",
            f.date.to_string(),
            f.horizon,
            f.value,
            fmt_opt(f.lower_bound),
            fmt_opt(f.upper_bound),
        ));
    }
    out
}

/// Per-period sentiment listing.
pub fn format_sentiment_summary(summary: &SentimentSummary, undated: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Days with net sentiment: {} | undated articles skipped: {undated}\n",
        summary.daily.len()
    ));
    out.push_str(&format!("{:<10}  {:>8}\n", "period", "score"));
    for p in &summary.periods {
        out.push_str(&format!("{:<10}  {:>8.3}\n", p.date.to_string(), p.score));
    }
    out
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ObservationKind;
    use chrono::NaiveDate;

    #[test]
    fn table_formats_bounds_and_missing_values() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let rows = vec![
            InflationObservation {
                date,
                value: 13.27,
                kind: ObservationKind::Forecast,
                lower_bound: Some(12.6820),
                upper_bound: Some(13.8580),
                horizon: 1,
            },
            InflationObservation::actual(date, 14.0),
        ];
        let txt = format_forecast_table(&rows);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[1], "2026-01-01   1     13.27     12.68     13.86");
        assert_eq!(lines[2], "2026-01-01   0     14.00         -         -");
    }

    #[test]
    fn summary_includes_breakdown() {
        let b = ForecastBreakdown {
            sentiment_effect: 0.48,
            inflation_momentum: 12.29,
            intercept: 0.5,
            value: 13.27,
        };
        let txt = format_run_summary("test", &[], &b, &ForecastConfig::default());
        assert!(txt.contains("Sentiment effect:      0.48 pp"));
        assert!(txt.contains("Forecast:             13.27 %"));
    }
}
