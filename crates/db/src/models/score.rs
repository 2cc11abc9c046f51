//! Points ledger row model.

use pulsefit_core::points::{PointsLedger, ScoreEntry};
use pulsefit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// A row from the `user_scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserScore {
    pub id: DbId,
    pub user_id: DbId,
    pub total_score: i64,
    pub level: i32,
    pub daily_points: i64,
    pub last_reset_date: Timestamp,
    pub score_history: Json<Vec<ScoreEntry>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserScore {
    pub fn ledger(&self) -> PointsLedger {
        PointsLedger {
            total_score: self.total_score,
            level: self.level,
            daily_points: self.daily_points,
            last_reset_date: self.last_reset_date,
            score_history: self.score_history.0.clone(),
        }
    }
}

/// DTO for awarding points directly.
#[derive(Debug, Deserialize)]
pub struct AddPoints {
    pub action: String,
    pub points: i64,
}
