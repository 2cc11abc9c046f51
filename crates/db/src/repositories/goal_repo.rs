//! Repository for the `goals` table.

use pulsefit_core::error::CoreError;
use pulsefit_core::goal;
use pulsefit_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::goal::Goal;

const COLUMNS: &str = "id, user_id, goal_type, status, start_date, target_date, \
                       start_value, current_value, target_value, unit, milestones, \
                       weekly_progress, notes, motivation, created_at, updated_at";

/// Provides CRUD operations and locked progress updates for goals.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a new goal built by the domain layer.
    pub async fn create(pool: &PgPool, user_id: DbId, g: &goal::Goal) -> Result<Goal, sqlx::Error> {
        let query = format!(
            "INSERT INTO goals (user_id, goal_type, status, start_date, target_date, \
                                start_value, current_value, target_value, unit, \
                                milestones, weekly_progress, notes, motivation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .bind(g.goal_type.as_str())
            .bind(g.status.as_str())
            .bind(g.start_date)
            .bind(g.target_date)
            .bind(g.start_value)
            .bind(g.current_value)
            .bind(g.target_value)
            .bind(&g.unit)
            .bind(Json(&g.milestones))
            .bind(Json(&g.weekly_progress))
            .bind(Json(&g.notes))
            .bind(Json(&g.motivation))
            .fetch_one(pool)
            .await
    }

    /// Find a goal by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's goals, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Goal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM goals WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Goal>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Lock a goal, apply `f` to its domain form, and persist the result.
    ///
    /// Returns `Ok(None)` if the goal does not exist.
    pub async fn modify<F, R, E>(pool: &PgPool, id: DbId, f: F) -> Result<Option<(Goal, R)>, E>
    where
        F: FnOnce(&mut goal::Goal) -> Result<R, E>,
        E: From<sqlx::Error> + From<CoreError>,
    {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut g = row.to_domain()?;
        let out = f(&mut g)?;

        let query = format!(
            "UPDATE goals SET \
                 status = $2, \
                 current_value = $3, \
                 milestones = $4, \
                 weekly_progress = $5, \
                 notes = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(g.status.as_str())
            .bind(g.current_value)
            .bind(Json(&g.milestones))
            .bind(Json(&g.weekly_progress))
            .bind(Json(&g.notes))
            .fetch_one(&mut *tx)
            .await?;

        tracing::debug!(goal_id = id, status = %row.status, "Goal locked and updated");
        tx.commit().await?;
        Ok(Some((row, out)))
    }

    /// Delete a goal. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
