//! Public profile models.

use pulsefit_core::leaderboard::Contender;
use pulsefit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub level: i32,
    pub experience_points: i64,
    pub public_profile: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for toggling leaderboard visibility.
#[derive(Debug, Deserialize)]
pub struct SetVisibility {
    pub public_profile: bool,
}

/// A public profile joined with its username and current streak.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub user_id: DbId,
    pub username: String,
    pub level: i32,
    pub experience_points: i64,
    pub current_streak: i32,
}

impl From<LeaderboardRow> for Contender {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            user_id: row.user_id,
            name: row.username,
            level: row.level,
            experience_points: row.experience_points,
            streak: row.current_streak,
        }
    }
}
