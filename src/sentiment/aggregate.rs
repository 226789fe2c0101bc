//! Net-sentiment aggregation.
//!
//! Article labels become a per-period sentiment series in three passes:
//!
//! 1. daily net: `#positive - #negative` per calendar day (neutral and errored
//!    labels are dropped before counting, so neutral-only days do not appear)
//! 2. trailing mean over the last `window` daily rows (minimum one row)
//! 3. mean of the smoothed daily values within each period

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Frequency, SentimentObservation};
use crate::sentiment::analyzer::SentimentLabel;
use crate::series::period_start;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 7;

/// A dated polarity label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelledItem {
    pub date: NaiveDate,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub net: i64,
    pub smoothed: f64,
}

/// Output of a full aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct SentimentSummary {
    pub daily: Vec<DailySentiment>,
    pub periods: Vec<SentimentObservation>,
}

/// Net positive-minus-negative count per day, ascending by date.
pub fn daily_net(items: &[LabelledItem]) -> Vec<(NaiveDate, i64)> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for item in items {
        if matches!(item.label, SentimentLabel::Neutral | SentimentLabel::Error) {
            continue;
        }
        *by_day.entry(item.date).or_insert(0) += item.label.polarity();
    }
    by_day.into_iter().collect()
}

/// Trailing mean over the previous `window` rows (rows, not calendar days).
pub fn smooth_daily(net: &[(NaiveDate, i64)], window: usize) -> Vec<DailySentiment> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(net.len());
    let mut running = 0i64;
    for (i, &(date, value)) in net.iter().enumerate() {
        running += value;
        if i >= window {
            running -= net[i - window].1;
        }
        let n = (i + 1).min(window);
        out.push(DailySentiment {
            date,
            net: value,
            smoothed: running as f64 / n as f64,
        });
    }
    out
}

/// Mean smoothed sentiment per period, dated at the period start.
pub fn aggregate_by_period(daily: &[DailySentiment], frequency: Frequency) -> Vec<SentimentObservation> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for d in daily {
        let entry = buckets.entry(period_start(d.date, frequency)).or_insert((0.0, 0));
        entry.0 += d.smoothed;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, n))| SentimentObservation {
            date,
            score: sum / n as f64,
        })
        .collect()
}

pub fn aggregate(items: &[LabelledItem], frequency: Frequency, window: usize) -> SentimentSummary {
    let daily = smooth_daily(&daily_net(items), window);
    let periods = aggregate_by_period(&daily, frequency);
    SentimentSummary { daily, periods }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn item(m: u32, day: u32, label: SentimentLabel) -> LabelledItem {
        LabelledItem { date: d(m, day), label }
    }

    #[test]
    fn daily_net_drops_neutral_days() {
        use SentimentLabel::*;
        let items = vec![
            item(1, 2, Positive),
            item(1, 2, Positive),
            item(1, 2, Negative),
            item(1, 1, Negative),
            item(1, 3, Neutral),
            item(1, 4, Error),
        ];
        assert_eq!(daily_net(&items), vec![(d(1, 1), -1), (d(1, 2), 1)]);
    }

    #[test]
    fn smoothing_uses_partial_windows_then_slides() {
        let net: Vec<(NaiveDate, i64)> = (1..=4).map(|day| (d(1, day), day as i64)).collect();
        let smoothed: Vec<f64> = smooth_daily(&net, 2).iter().map(|s| s.smoothed).collect();
        assert_eq!(smoothed, vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn period_mean_averages_smoothed_values() {
        use SentimentLabel::*;
        let items = vec![item(1, 30, Positive), item(1, 31, Positive), item(2, 1, Negative)];
        let summary = aggregate(&items, Frequency::Monthly, 7);

        // Smoothed: 1.0, 1.0, (1 + 1 - 1) / 3.
        assert_eq!(summary.daily.len(), 3);
        assert_eq!(summary.periods.len(), 2);
        assert_eq!(summary.periods[0].date, d(1, 1));
        assert!((summary.periods[0].score - 1.0).abs() < 1e-12);
        assert!((summary.periods[1].score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let summary = aggregate(&[], Frequency::Monthly, 7);
        assert!(summary.daily.is_empty());
        assert!(summary.periods.is_empty());
    }
}
