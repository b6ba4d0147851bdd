//! Daily record lifecycle.
//!
//! At most one [`DailyRecord`] exists per date. It is created lazily the first
//! time a date is observed, with a target derived from the tracking origin,
//! and is never overwritten by later initialization.

use chrono::NaiveDate;

use crate::clock::{date_key, parse_date};
use crate::error::{CoreError, Result};
use crate::model::DailyRecord;
use crate::progression::{calculate_target, FIRST_DAY_TARGET};
use crate::storage::{Bucket, Txn};

/// Config key holding the first tracked date as a raw `YYYY-MM-DD` string.
pub const ORIGIN_KEY: &str = "firstDay";

/// Read the tracking origin, if one has been written.
///
/// # Errors
/// Fails with [`CoreError::InvalidDate`] when the stored value is not a date.
pub fn read_origin(txn: &Txn<'_>) -> Result<Option<NaiveDate>> {
    let Some(raw) = txn.get(Bucket::Config, ORIGIN_KEY)? else {
        return Ok(None);
    };
    let text = String::from_utf8_lossy(&raw);
    if text.is_empty() {
        return Ok(None);
    }
    parse_date(ORIGIN_KEY, &text).map(Some)
}

fn write_origin(txn: &Txn<'_>, origin: NaiveDate) -> Result<()> {
    txn.put(Bucket::Config, ORIGIN_KEY, date_key(origin).as_bytes())
}

/// Whole days from `origin` to `today`. Negative spans are clock skew.
pub fn days_since(origin: NaiveDate, today: NaiveDate) -> Result<u32> {
    let days = (today - origin).num_days();
    u32::try_from(days).map_err(|_| CoreError::ClockSkew { origin, today })
}

/// Stored record for `date`, if any.
pub fn load_day(txn: &Txn<'_>, date: NaiveDate) -> Result<Option<DailyRecord>> {
    txn.get_json(Bucket::Days, &date_key(date))
}

pub fn save_day(txn: &Txn<'_>, record: &DailyRecord) -> Result<()> {
    txn.put_json(Bucket::Days, &date_key(record.date), record)
}

/// Return the record for `today`, creating it if it does not exist yet.
///
/// On the very first run the origin is set to `today` and the target is
/// [`FIRST_DAY_TARGET`]. An existing record is returned untouched.
pub fn ensure_day(txn: &Txn<'_>, today: NaiveDate) -> Result<DailyRecord> {
    if let Some(existing) = load_day(txn, today)? {
        return Ok(existing);
    }

    let target = match read_origin(txn)? {
        None => {
            write_origin(txn, today)?;
            tracing::info!(origin = %today, "tracking origin initialized");
            FIRST_DAY_TARGET
        }
        Some(origin) => calculate_target(FIRST_DAY_TARGET, days_since(origin, today)?),
    };

    let record = DailyRecord::new(today, target);
    save_day(txn, &record)?;
    tracing::info!(date = %today, count = target, "daily record created");
    Ok(record)
}
