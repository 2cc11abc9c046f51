//! Repository for the `workouts` table.

use pulsefit_core::types::DbId;
use pulsefit_core::workout::Exercise;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::workout::Workout;

const COLUMNS: &str =
    "id, user_id, name, exercises, duration_mins, notes, created_at, updated_at";

/// Provides CRUD operations for workouts.
pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Insert a new workout. Exercises are stored exactly as given.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        exercises: &[Exercise],
        duration_mins: Option<i32>,
        notes: Option<&str>,
    ) -> Result<Workout, sqlx::Error> {
        let query = format!(
            "INSERT INTO workouts (user_id, name, exercises, duration_mins, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workout>(&query)
            .bind(user_id)
            .bind(name)
            .bind(Json(exercises))
            .bind(duration_mins)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Find a workout by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE id = $1");
        sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's workouts, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Workout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workouts WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Workout>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Lock a workout, let `f` rewrite it, and persist name, exercises,
    /// duration and notes.
    ///
    /// Returns `Ok(None)` if the workout does not exist.
    pub async fn modify<F, R, E>(pool: &PgPool, id: DbId, f: F) -> Result<Option<(Workout, R)>, E>
    where
        F: FnOnce(&mut Workout) -> Result<R, E>,
        E: From<sqlx::Error>,
    {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM workouts WHERE id = $1 FOR UPDATE");
        let Some(mut workout) = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let out = f(&mut workout)?;

        let query = format!(
            "UPDATE workouts SET \
                 name = $2, \
                 exercises = $3, \
                 duration_mins = $4, \
                 notes = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Workout>(&query)
            .bind(id)
            .bind(&workout.name)
            .bind(&workout.exercises)
            .bind(workout.duration_mins)
            .bind(&workout.notes)
            .fetch_one(&mut *tx)
            .await?;

        tracing::debug!(workout_id = id, "Workout locked and updated");
        tx.commit().await?;
        Ok(Some((row, out)))
    }

    /// Delete a workout. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
