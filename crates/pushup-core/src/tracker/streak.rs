//! Streak engine.
//!
//! `record_completion` is a raw primitive: it is NOT idempotent and must run at
//! most once per date, inside the same transaction that flips the day to
//! completed. [`Tracker::complete_today`](super::Tracker::complete_today)
//! provides that guard.

use chrono::{Days, NaiveDate};

use crate::error::{CoreError, Result};
use crate::model::StreakState;
use crate::storage::{Bucket, Txn};

use super::daily::load_day;

/// Streak bucket key of the singleton state.
pub const STREAK_KEY: &str = "current";

/// Load the streak, defaulting to zeros when none has been written.
pub fn load_streak(txn: &Txn<'_>) -> Result<StreakState> {
    Ok(txn
        .get_json::<StreakState>(Bucket::Streak, STREAK_KEY)?
        .unwrap_or_default())
}

/// Whether the day before `date` is stored and completed.
///
/// A corrupt record for that day counts as not completed, so a single bad
/// entry resets the run instead of blocking every later completion.
fn previous_day_completed(txn: &Txn<'_>, date: NaiveDate) -> Result<bool> {
    let Some(yesterday) = date.checked_sub_days(Days::new(1)) else {
        return Ok(false);
    };
    match load_day(txn, yesterday) {
        Ok(record) => Ok(record.is_some_and(|r| r.completed)),
        Err(CoreError::Json(e)) => {
            tracing::warn!(date = %yesterday, error = %e, "unreadable day record, streak restarts");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Advance the streak for a completion on `date` and persist it.
pub fn record_completion(txn: &Txn<'_>, date: NaiveDate) -> Result<StreakState> {
    let mut streak = load_streak(txn)?;

    if previous_day_completed(txn, date)? {
        streak.current += 1;
    } else {
        streak.current = 1;
    }
    streak.longest = streak.longest.max(streak.current);
    streak.last_date = Some(date);

    txn.put_json(Bucket::Streak, STREAK_KEY, &streak)?;
    tracing::info!(
        date = %date,
        current = streak.current,
        longest = streak.longest,
        "streak updated"
    );
    Ok(streak)
}
