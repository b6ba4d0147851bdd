//! # Push-Up Tracker Core Library
//!
//! Business logic for a single-user daily habit tracker. Each calendar day
//! gets one record with a target that grows over time; marking the day done
//! advances a streak. The CLI and the HTTP server are thin layers over this
//! crate.
//!
//! ## Architecture
//!
//! - **Progression**: pure function from elapsed days to the day's target
//! - **Tracker**: lazy daily records, the at-most-once completion guard and the
//!   streak engine, all inside store transactions
//! - **Calendar**: read-only yearly projection of the stored days
//! - **Storage**: SQLite-backed bucketed key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: public operations (`ensure_today`, `complete_today`, `streak`, `calendar`)
//! - [`Database`]: transactional record store
//! - [`Config`]: application configuration
//! - [`Clock`]: local-date source shared by every date computation

pub mod calendar;
pub mod clock;
pub mod error;
pub mod model;
pub mod progression;
pub mod storage;
pub mod tracker;

pub use calendar::{parse_year_param, CalendarView, MonthStatus};
pub use clock::{Clock, FixedClock, LocalClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use model::{DailyRecord, StreakState};
pub use progression::{calculate_target, Band, FIRST_DAY_TARGET, TARGET_CAP};
pub use storage::{Config, Database};
pub use tracker::Tracker;
