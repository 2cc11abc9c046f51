//! Repository for the `streaks` table.

use pulsefit_core::streak::StreakState;
use pulsefit_core::types::DbId;
use sqlx::PgPool;

use crate::models::streak::Streak;

const COLUMNS: &str = "id, user_id, current_streak, longest_streak, last_activity_date, \
                       in_grace_period, grace_period_hours, minimum_steps_threshold, \
                       created_at, updated_at";

/// Provides lazy creation and locked updates of per-user streaks.
pub struct StreakRepo;

impl StreakRepo {
    /// Find the streak row for a user, if one has been created.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Streak>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM streaks WHERE user_id = $1");
        sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the user's streak (creating it with defaults if missing), apply
    /// `f` to its state, and persist the result.
    ///
    /// `f` returns whether the state changed; an unchanged state skips the
    /// write.
    pub async fn modify<F, R, E>(pool: &PgPool, user_id: DbId, f: F) -> Result<(Streak, R), E>
    where
        F: FnOnce(&mut StreakState) -> Result<(bool, R), E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO streaks (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM streaks WHERE user_id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, Streak>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut state = row.state();
        let (changed, out) = f(&mut state)?;

        let row = if changed {
            let query = format!(
                "UPDATE streaks SET \
                     current_streak = $2, \
                     longest_streak = $3, \
                     last_activity_date = $4, \
                     in_grace_period = $5 \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Streak>(&query)
                .bind(row.id)
                .bind(state.current_streak)
                .bind(state.longest_streak)
                .bind(state.last_activity_date)
                .bind(state.in_grace_period)
                .fetch_one(&mut *tx)
                .await?
        } else {
            row
        };

        tracing::debug!(user_id, changed, current = row.current_streak, "Streak locked and updated");
        tx.commit().await?;
        Ok((row, out))
    }
}
