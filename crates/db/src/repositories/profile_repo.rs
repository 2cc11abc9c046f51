//! Repository for the `user_profiles` table.

use pulsefit_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_profile::{LeaderboardRow, UserProfile};

const COLUMNS: &str =
    "id, user_id, level, experience_points, public_profile, created_at, updated_at";

/// Provides profile reads, level sync and the leaderboard query.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile for a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Mirror the ledger level into the profile (upsert).
    pub async fn sync_level(
        pool: &PgPool,
        user_id: DbId,
        level: i32,
        experience_points: i64,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, level, experience_points) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 level = EXCLUDED.level, \
                 experience_points = EXCLUDED.experience_points \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(level)
            .bind(experience_points)
            .fetch_one(pool)
            .await
    }

    /// Set whether the profile appears on the leaderboard (upsert).
    pub async fn set_visibility(
        pool: &PgPool,
        user_id: DbId,
        public_profile: bool,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, public_profile) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 public_profile = EXCLUDED.public_profile \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(public_profile)
            .fetch_one(pool)
            .await
    }

    /// All public profiles with username and current streak (0 when the
    /// user has no streak row yet). Ordering is left to the ranking.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardRow>(
            "SELECT p.user_id, u.username, p.level, p.experience_points, \
                    COALESCE(s.current_streak, 0) AS current_streak \
             FROM user_profiles p \
             JOIN users u ON u.id = p.user_id \
             LEFT JOIN streaks s ON s.user_id = p.user_id \
             WHERE p.public_profile",
        )
        .fetch_all(pool)
        .await
    }
}
