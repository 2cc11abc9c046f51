//! Daily log row model and DTOs.

use chrono::NaiveDate;
use pulsefit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `daily_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyLog {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub value: f64,
    pub unit: String,
    pub log_date: NaiveDate,
    pub logged_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an upsert: the row plus whether it was newly inserted.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedLog {
    #[sqlx(flatten)]
    pub log: DailyLog,
    pub inserted: bool,
}

/// DTO for logging a value.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDailyLog {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub unit: Option<String>,
}

/// Query parameters for listing logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyLogFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
