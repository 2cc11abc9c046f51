//! Streak row model.

use pulsefit_core::streak::StreakState;
use pulsefit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `streaks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Streak {
    pub id: DbId,
    pub user_id: DbId,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Timestamp>,
    pub in_grace_period: bool,
    pub grace_period_hours: i32,
    pub minimum_steps_threshold: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Streak {
    pub fn state(&self) -> StreakState {
        StreakState {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date: self.last_activity_date,
            in_grace_period: self.in_grace_period,
            grace_period_hours: self.grace_period_hours,
            minimum_steps_threshold: self.minimum_steps_threshold,
        }
    }
}
