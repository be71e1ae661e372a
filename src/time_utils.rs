// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for parsing upstream date/time text.
//!
//! Upstream dates look like "July 1, 2025" or "July 1, 2025 to August 5, 2025";
//! times look like "9:00 AM - 10:00 AM" or "Noon - 1:00 PM". Parsing never
//! fails: unreadable text maps to a sentinel that sorts first.

use chrono::{NaiveDate, NaiveTime};

const DATE_FORMAT: &str = "%B %d, %Y";
const TIME_FORMAT: &str = "%I:%M %p";
const REPEATING_SEPARATOR: &str = " to ";
const TIME_RANGE_SEPARATOR: &str = " - ";

/// Date used when a date range cannot be parsed.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Whether a date range describes a repeating "X to Y" schedule.
pub fn is_repeating(date_range: &str) -> bool {
    date_range.contains(REPEATING_SEPARATOR)
}

/// Start date of a date range, or the sentinel date.
pub fn parse_start_date(date_range: &str) -> NaiveDate {
    let start = date_range
        .split(REPEATING_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();
    NaiveDate::parse_from_str(start, DATE_FORMAT).unwrap_or_else(|_| sentinel_date())
}

/// Start time of a time range, or midnight.
pub fn parse_start_time(time_range: &str) -> NaiveTime {
    let start = time_range
        .split(TIME_RANGE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();
    if start.eq_ignore_ascii_case("noon") {
        return NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    }
    NaiveTime::parse_from_str(start, TIME_FORMAT).unwrap_or(NaiveTime::MIN)
}

/// Append the weekday of `start` to a date range: "(Tuesday)" for a single
/// date, "(Tuesdays)" for a repeating range.
pub fn label_date_range(date_range: &str, start: NaiveDate) -> String {
    let weekday = start.format("%A");
    if is_repeating(date_range) {
        format!("{} ({}s)", date_range, weekday)
    } else {
        format!("{} ({})", date_range, weekday)
    }
}
