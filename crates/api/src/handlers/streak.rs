//! Handlers for the per-user activity streak.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pulsefit_core::streak::{assess, StreakActivity, StreakStatus};
use pulsefit_core::types::Timestamp;
use pulsefit_db::repositories::StreakRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::progression::record_streak_activity;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StreakView {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Timestamp>,
    pub in_grace_period: bool,
    pub grace_period_hours: i32,
    pub minimum_steps_threshold: i32,
    pub status: StreakStatus,
}

#[derive(Debug, Deserialize)]
pub struct RecordActivity {
    pub activity_type: String,
    #[serde(default)]
    pub value: f64,
}

/// GET /api/v1/users/{user_id}/streak
///
/// Returns the streak as of now. A streak that can no longer be extended is
/// persisted with `current_streak = 0` on read.
pub async fn get_streak(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let now = Utc::now();
    let calendar = *state.calendar();
    let (row, status) = StreakRepo::modify::<_, _, AppError>(&state.pool, user_id, |streak| {
        let assessment = assess(streak, now, &calendar);
        *streak = assessment.state;
        Ok((assessment.changed, assessment.status))
    })
    .await?;

    Ok(Json(DataResponse {
        data: StreakView {
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
            last_activity_date: row.last_activity_date,
            in_grace_period: row.in_grace_period,
            grace_period_hours: row.grace_period_hours,
            minimum_steps_threshold: row.minimum_steps_threshold,
            status,
        },
    }))
}

/// POST /api/v1/users/{user_id}/streak/activity
///
/// Evaluate an activity (`workout`, `steps`, ...) against the streak.
/// Non-qualifying activities return 200 with `outcome = not_qualifying`.
pub async fn record_activity(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<RecordActivity>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    if !input.value.is_finite() {
        return Err(AppError::BadRequest("value must be a number".into()));
    }

    let activity = StreakActivity::from_parts(input.activity_type.trim(), input.value);
    let update = record_streak_activity(&state, user_id, &activity, Utc::now()).await?;

    tracing::info!(
        user_id,
        activity_type = %input.activity_type,
        outcome = ?update.outcome,
        current_streak = update.current_streak,
        "Streak activity recorded"
    );

    Ok(Json(DataResponse { data: update }))
}
