//! Persisted entities.
//!
//! The JSON field names are the stored layout and the HTTP wire format at the
//! same time: `{"date","count","done"}` for a day and
//! `{"current","longest","lastDate"}` for the streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One tracked calendar day.
///
/// `target` is fixed when the record is created; `completed` only ever goes
/// from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(rename = "count")]
    pub target: u32,
    #[serde(rename = "done")]
    pub completed: bool,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, target: u32) -> Self {
        Self {
            date,
            target,
            completed: false,
        }
    }
}

/// Current and longest run of consecutive completed days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
    /// Date of the most recent streak update; `None` before the first completion.
    #[serde(default, with = "empty_date")]
    pub last_date: Option<NaiveDate>,
}

/// `Option<NaiveDate>` stored as `"YYYY-MM-DD"`, with `""` meaning `None`.
mod empty_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::clock::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(DATE_FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
