//! Yearly calendar projection.
//!
//! A read-only view over the `Days` bucket: which months to render (from the
//! first recorded month onward) and the records of one year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::{month0, parse_date, year_prefix};
use crate::error::{Result, ValidationError};
use crate::model::DailyRecord;
use crate::storage::{Bucket, Txn};

/// Records of one year plus the origin month the display starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub year: i32,
    /// Zero-based month (January = 0) of the earliest record.
    pub start_month: u32,
    pub start_year: i32,
    /// Records keyed by `YYYY-MM-DD`.
    pub days: BTreeMap<String, DailyRecord>,
}

/// How a month relates to today and to the first tracked month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStatus {
    /// Before tracking began; nothing to show.
    BeforeOrigin,
    /// A finished month on or after the origin.
    Previous,
    Current,
    Upcoming,
}

impl CalendarView {
    /// Classify month `month0` (0-11) of this view's year.
    ///
    /// # Errors
    /// Fails when `month0` is not a valid month index.
    pub fn month_status(&self, month0: u32, today: NaiveDate) -> Result<MonthStatus, ValidationError> {
        if month0 > 11 {
            return Err(ValidationError::MonthOutOfRange(month0));
        }
        let month = (self.year, month0);
        let status = if month < (self.start_year, self.start_month) {
            MonthStatus::BeforeOrigin
        } else if month < (today.year(), today.month0()) {
            MonthStatus::Previous
        } else if month == (today.year(), today.month0()) {
            MonthStatus::Current
        } else {
            MonthStatus::Upcoming
        };
        Ok(status)
    }

    /// Record for `date`, if it falls in this view.
    pub fn day(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&crate::clock::date_key(date))
    }
}

/// Build the calendar for `year`.
///
/// Unreadable records are skipped with a warning so one corrupt entry never
/// hides the rest of the year.
pub fn project_calendar(txn: &Txn<'_>, year: i32, today: NaiveDate) -> Result<CalendarView> {
    let (start_year, start_month) = match txn.first_key(Bucket::Days)? {
        Some(key) => {
            let first = parse_date(&key, &key)?;
            (first.year(), month0(first))
        }
        None => (today.year(), month0(today)),
    };

    let mut days = BTreeMap::new();
    for (key, value) in txn.scan_prefix(Bucket::Days, &year_prefix(year))? {
        match serde_json::from_slice::<DailyRecord>(&value) {
            Ok(record) => {
                days.insert(key, record);
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable day record"),
        }
    }

    Ok(CalendarView {
        year,
        start_month,
        start_year,
        days,
    })
}

/// Year from a `?year=` query value.
///
/// Anything other than a four-digit year falls back to `today`'s year
/// rather than failing the request.
pub fn parse_year_param(raw: Option<&str>, today: NaiveDate) -> i32 {
    raw.map(str::trim)
        .filter(|s| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or_else(|| today.year())
}
