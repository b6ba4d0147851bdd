//! Progressive daily target.
//!
//! The target starts at [`FIRST_DAY_TARGET`] and grows once per elapsed day.
//! The growth rate depends on the band the running target is in:
//!
//! ```text
//!   < 50      +2 per day
//!   50..100   +1 per day
//!   100..200  +1 every second day (even offsets within the band)
//!   200       frozen
//! ```

use serde::{Deserialize, Serialize};

/// Target on the very first tracked day.
pub const FIRST_DAY_TARGET: u32 = 10;

/// Hard ceiling; once reached the target never changes.
pub const TARGET_CAP: u32 = 200;

/// Growth band a running target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Below 50: +2 per day.
    Ramp,
    /// 50-99: +1 per day.
    Steady,
    /// 100-199: +1 every second day.
    Slow,
    /// 200: no further increase.
    Capped,
}

impl Band {
    pub fn of(target: u32) -> Self {
        match target {
            t if t >= TARGET_CAP => Band::Capped,
            t if t >= 100 => Band::Slow,
            t if t >= 50 => Band::Steady,
            _ => Band::Ramp,
        }
    }
}

/// Target after `days_since` elapsed days, starting from `start_count` on day 0.
///
/// Values above the cap are clamped. The loop exits as soon as the cap is hit,
/// so large day counts cost at most a few hundred iterations.
pub fn calculate_target(start_count: u32, days_since: u32) -> u32 {
    let mut target = start_count.min(TARGET_CAP);
    let mut slow_offset: u32 = 0;

    for _ in 0..days_since {
        match Band::of(target) {
            Band::Capped => break,
            Band::Slow => {
                if slow_offset % 2 == 0 {
                    target += 1;
                }
                slow_offset += 1;
            }
            Band::Steady => target += 1,
            Band::Ramp => target += 2,
        }
    }

    target.min(TARGET_CAP)
}

/// One row of a progression preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub day: u32,
    pub target: u32,
    pub band: Band,
}

/// Targets for days `0..=days` of a fresh installation.
pub fn progression_table(days: u32) -> Vec<ProgressionStep> {
    (0..=days)
        .map(|day| {
            let target = calculate_target(FIRST_DAY_TARGET, day);
            ProgressionStep {
                day,
                target,
                band: Band::of(target),
            }
        })
        .collect()
}
