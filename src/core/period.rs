//! Calendar helpers shared by validation, payroll and reports.
//!
//! All dates crossing the HTTP boundary use the strict ISO 8601 calendar form
//! `YYYY-MM-DD`; times of day use 24-hour `HH:MM` or `HH:MM:SS`.

use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day in the range
    pub start: NaiveDate,
    /// Last day in the range
    pub end: NaiveDate,
}

/// Today's date in the server's local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a strict `YYYY-MM-DD` date.
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // chrono accepts unpadded fields ("2024-3-1"); the fixed width rules that out
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses a 24-hour `HH:MM` or `HH:MM:SS` time of day.
#[must_use]
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    match value.len() {
        5 => NaiveTime::parse_from_str(value, "%H:%M").ok(),
        8 => NaiveTime::parse_from_str(value, "%H:%M:%S").ok(),
        _ => None,
    }
}

/// The calendar month containing `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> DateRange {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    DateRange { start, end }
}

/// The Monday-to-Sunday week containing `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> DateRange {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    DateRange { start, end }
}
