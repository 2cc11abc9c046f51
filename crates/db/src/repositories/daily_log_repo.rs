//! Repository for the `daily_logs` table.

use chrono::NaiveDate;
use pulsefit_core::daily_log::LogKind;
use pulsefit_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::daily_log::{DailyLog, UpsertedLog};

const COLUMNS: &str =
    "id, user_id, kind, value, unit, log_date, logged_at, created_at, updated_at";

/// Provides upsert and filtered listing of daily logs.
pub struct DailyLogRepo;

impl DailyLogRepo {
    /// Record a value for `(user, kind, log_date)`, overwriting any value
    /// already logged that day.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        kind: LogKind,
        value: f64,
        unit: &str,
        log_date: NaiveDate,
        logged_at: Timestamp,
    ) -> Result<UpsertedLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_logs (user_id, kind, value, unit, log_date, logged_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, kind, log_date) DO UPDATE SET \
                 value = EXCLUDED.value, \
                 unit = EXCLUDED.unit, \
                 logged_at = EXCLUDED.logged_at \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedLog>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .bind(value)
            .bind(unit)
            .bind(log_date)
            .bind(logged_at)
            .fetch_one(pool)
            .await
    }

    /// List a user's logs, optionally narrowed to one kind and an inclusive
    /// date range, oldest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        kind: Option<LogKind>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DailyLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_logs \
             WHERE user_id = $1 \
               AND ($2::TEXT IS NULL OR kind = $2) \
               AND ($3::DATE IS NULL OR log_date >= $3) \
               AND ($4::DATE IS NULL OR log_date <= $4) \
             ORDER BY log_date ASC, kind ASC"
        );
        sqlx::query_as::<_, DailyLog>(&query)
            .bind(user_id)
            .bind(kind.map(|k| k.as_str()))
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
