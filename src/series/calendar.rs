//! Calendar helpers for period-indexed series.
//!
//! Series are keyed by the first day of their period: the first of the month for
//! monthly data, January 1st for annual data.

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::Frequency;

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the period (month or year) containing `date`.
pub fn period_start(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Monthly => month_start(date),
        Frequency::Annual => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

/// `date + months` calendar months, or `None` past the end of the calendar.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Parse `YYYY-MM-DD`, also accepting timestamps by reading the first 10 chars.
pub fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
