//! Repository for the `user_scores` table.

use pulsefit_core::points::PointsLedger;
use pulsefit_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::score::UserScore;

const COLUMNS: &str = "id, user_id, total_score, level, daily_points, last_reset_date, \
                       score_history, created_at, updated_at";

/// Provides lazy creation and locked updates of per-user points ledgers.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Find the ledger for a user, if one has been created.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserScore>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_scores WHERE user_id = $1");
        sqlx::query_as::<_, UserScore>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the user's ledger (creating an empty one opened at `now` if
    /// missing), apply `f`, and persist the result when `f` reports a change.
    pub async fn modify<F, R, E>(
        pool: &PgPool,
        user_id: DbId,
        now: Timestamp,
        f: F,
    ) -> Result<(UserScore, R), E>
    where
        F: FnOnce(&mut PointsLedger) -> Result<(bool, R), E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO user_scores (user_id, last_reset_date) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM user_scores WHERE user_id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, UserScore>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut ledger = row.ledger();
        let (changed, out) = f(&mut ledger)?;

        let row = if changed {
            let query = format!(
                "UPDATE user_scores SET \
                     total_score = $2, \
                     level = $3, \
                     daily_points = $4, \
                     last_reset_date = $5, \
                     score_history = $6 \
                 WHERE id = $1 \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, UserScore>(&query)
                .bind(row.id)
                .bind(ledger.total_score)
                .bind(ledger.level)
                .bind(ledger.daily_points)
                .bind(ledger.last_reset_date)
                .bind(Json(&ledger.score_history))
                .fetch_one(&mut *tx)
                .await?
        } else {
            row
        };

        tracing::debug!(user_id, changed, total = row.total_score, "Score ledger locked and updated");
        tx.commit().await?;
        Ok((row, out))
    }
}
