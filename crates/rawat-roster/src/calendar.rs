//! Calendar math: strict date parsing, ISO-week → cycle-week mapping, and
//! the Indonesian date/day formatting used by the message templates.
//!
//! Cycle anchoring is deliberately ISO-week based: cycle week is
//! `((iso_week - 1) % 4) + 1`, which self-corrects across year boundaries.
//! A historical revision anchored the cycle to a fixed epoch date instead;
//! that variant produced different assignments for the same date and is
//! intentionally not supported.

use chrono::{Datelike, NaiveDate, Weekday};

use rawat_core::error::{RawatError, Result};

use crate::schedule::CycleWeek;

/// Parse a strict `YYYY-MM-DD` calendar date. Anything else is a
/// validation error, distinct from "no assignments".
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !shape_ok {
        return Err(RawatError::Validation(
            "Invalid date format. Please use YYYY-MM-DD".into(),
        ));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        RawatError::Validation("Invalid date format. Please use YYYY-MM-DD".into())
    })
}

/// ISO-8601 week-of-year (weeks start Monday; the week containing the
/// year's first Thursday is week 1).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Map an ISO week number onto the repeating 4-week rotation.
pub fn cycle_week_for(date: NaiveDate) -> CycleWeek {
    let week = iso_week_number(date);
    CycleWeek(((week - 1) % 4 + 1) as u8)
}

/// Indonesian day name (SENIN..MINGGU).
pub fn day_name_id(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "SENIN",
        Weekday::Tue => "SELASA",
        Weekday::Wed => "RABU",
        Weekday::Thu => "KAMIS",
        Weekday::Fri => "JUMAT",
        Weekday::Sat => "SABTU",
        Weekday::Sun => "MINGGU",
    }
}

/// Indonesian `d MMM yyyy` date (e.g. "10 Feb 2025"), as used in the
/// group summary header.
pub fn format_date_id(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
    ];
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Whether the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
