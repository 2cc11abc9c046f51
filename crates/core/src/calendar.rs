//! Calendar-day arithmetic in a fixed evaluation timezone.
//!
//! Streaks, the daily points window, and goal day spans all reason about
//! calendar days rather than elapsed time. A [`Calendar`] truncates
//! timestamps to a local date in one process-wide UTC offset so those
//! decisions agree with each other.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest accepted offset magnitude, in minutes (UTC-14:00 .. UTC+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Day boundary definition used by every calendar-day comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    /// Calendar whose days start at midnight UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar whose days start at midnight in `UTC + minutes`.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::Validation(format!(
                "Day boundary offset must be within +/-{MAX_OFFSET_MINUTES} minutes, got {minutes}"
            )));
        }
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            CoreError::Validation(format!("Invalid day boundary offset: {minutes} minutes"))
        })?;
        Ok(Self { offset })
    }

    /// Offset from UTC in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// The local calendar date `ts` falls on.
    pub fn local_date(&self, ts: Timestamp) -> NaiveDate {
        ts.with_timezone(&self.offset).date_naive()
    }

    /// Whole calendar days from `earlier` to `later`.
    ///
    /// Negative when `later` falls on an earlier local date.
    pub fn days_between(&self, earlier: Timestamp, later: Timestamp) -> i64 {
        (self.local_date(later) - self.local_date(earlier)).num_days()
    }

    /// Whether both timestamps fall on the same local date.
    pub fn same_day(&self, a: Timestamp, b: Timestamp) -> bool {
        self.local_date(a) == self.local_date(b)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Wall-clock hours elapsed from `earlier` to `later`, fractional.
pub fn elapsed_hours(earlier: Timestamp, later: Timestamp) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}
