//! Tracker facade.
//!
//! Binds a [`Database`] to a [`Clock`] and exposes the public operations.
//! "Today" is read from the clock on every call and never cached, so a
//! long-running process that crosses midnight picks up the new day.
//!
//! ## Completion flow
//!
//! ```text
//! complete_today
//!   └─ update txn
//!        ├─ ensure_day(today)         create lazily if missing
//!        ├─ completed? → return as-is  (at-most-once guard)
//!        ├─ completed = true, save
//!        └─ record_completion(today)  streak, same txn
//! ```

pub mod daily;
pub mod streak;

use chrono::NaiveDate;

use crate::calendar::{project_calendar, CalendarView};
use crate::clock::{Clock, LocalClock};
use crate::error::Result;
use crate::model::{DailyRecord, StreakState};
use crate::storage::Database;

/// Single-user habit tracker over a record store.
pub struct Tracker<C: Clock = LocalClock> {
    db: Database,
    clock: C,
}

impl Tracker<LocalClock> {
    /// Tracker on the local wall clock.
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, LocalClock)
    }
}

impl<C: Clock> Tracker<C> {
    pub fn with_clock(db: Database, clock: C) -> Self {
        Self { db, clock }
    }

    pub fn today_date(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create today's record if it does not exist yet and return it.
    ///
    /// # Errors
    /// Storage failures, a corrupt tracking origin, or an origin in the future.
    pub fn ensure_today(&self) -> Result<DailyRecord> {
        let today = self.clock.today();
        self.db.update(|txn| daily::ensure_day(txn, today))
    }

    /// Today's record; created lazily like [`Tracker::ensure_today`].
    pub fn today(&self) -> Result<DailyRecord> {
        self.ensure_today()
    }

    /// Mark today complete and advance the streak, atomically.
    ///
    /// Calling it again on a completed day returns the stored record and
    /// leaves the streak untouched.
    pub fn complete_today(&self) -> Result<DailyRecord> {
        let today = self.clock.today();
        self.db.update(|txn| {
            let mut record = daily::ensure_day(txn, today)?;
            if record.completed {
                tracing::debug!(date = %today, "already completed");
                return Ok(record);
            }

            record.completed = true;
            daily::save_day(txn, &record)?;
            streak::record_completion(txn, today)?;
            Ok(record)
        })
    }

    /// Current streak, zeros if nothing has been completed yet.
    pub fn streak(&self) -> Result<StreakState> {
        self.db.view(streak::load_streak)
    }

    /// Calendar projection for `year`.
    pub fn calendar(&self, year: i32) -> Result<CalendarView> {
        let today = self.clock.today();
        self.db.view(|txn| project_calendar(txn, year, today))
    }

    /// Date the tracking began, if any record was ever created.
    pub fn origin(&self) -> Result<Option<NaiveDate>> {
        self.db.view(daily::read_origin)
    }
}
