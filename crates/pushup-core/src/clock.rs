//! Calendar-date clock.
//!
//! Every date key, comparison and "is today" check goes through a single
//! [`Clock`]. The production clock reads the local wall-clock date, never UTC,
//! so that a completion made just before local midnight lands on the day the
//! user sees.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{CoreError, Result};

/// Storage and wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today".
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local-timezone wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a date. Used by tests and by tooling that replays a day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a date as a store key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` string. `key` names where it came from for the error.
pub fn parse_date(key: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Four-digit year prefix used for calendar scans.
pub fn year_prefix(year: i32) -> String {
    format!("{year:04}")
}

/// Zero-based month index (January = 0).
pub fn month0(date: NaiveDate) -> u32 {
    date.month0()
}
