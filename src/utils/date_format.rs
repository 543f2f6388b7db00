//! Match dates travel as `DD/MM/YYYY` strings everywhere (storage
//! included); these helpers keep the format consistent at the API
//! boundary.

use chrono::{Local, NaiveDate};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today_as_string() -> String {
    format_date(Local::now().date_naive())
}

/// Strict validity check: the string must parse and round-trip to the
/// identical representation, so "1/3/2025" is rejected even though it
/// parses.
pub fn is_valid_date(date_str: &str) -> bool {
    match parse_date(date_str) {
        Some(date) => format_date(date) == date_str,
        None => false,
    }
}
