//! Handlers for the points ledger.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pulsefit_core::points::{roll_daily_window, PointsOutcome, ScoreEntry, DAILY_POINTS_CAP};
use pulsefit_core::types::Timestamp;
use pulsefit_db::models::score::AddPoints;
use pulsefit_db::repositories::ScoreRepo;
use pulsefit_events::ProgressEvent;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::progression::award_points;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub total_score: i64,
    pub level: i32,
    pub daily_points: i64,
    pub daily_cap: i64,
    pub remaining_today: i64,
    pub last_reset_date: Timestamp,
    pub score_history: Vec<ScoreEntry>,
}

#[derive(Debug, Serialize)]
pub struct AddPointsResponse {
    pub success: bool,
    pub message: &'static str,
    pub points_added: i64,
    pub total_score: i64,
    pub level: i32,
    pub daily_points: i64,
    pub leveled_up: bool,
}

impl From<PointsOutcome> for AddPointsResponse {
    fn from(outcome: PointsOutcome) -> Self {
        let (success, message) = match &outcome {
            PointsOutcome::Added(_) => (true, "Points added successfully"),
            PointsOutcome::DailyCapReached(_) => (false, "Daily points limit reached"),
        };
        let award = outcome.award();
        Self {
            success,
            message,
            points_added: award.points_added,
            total_score: award.total_score,
            level: award.level,
            daily_points: award.daily_points,
            leveled_up: award.leveled_up,
        }
    }
}

/// GET /api/v1/users/{user_id}/score
///
/// Returns the ledger, resetting `daily_points` first when a new day started.
pub async fn get_score(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let now = Utc::now();
    let calendar = *state.calendar();
    let (row, _) = ScoreRepo::modify::<_, _, AppError>(&state.pool, user_id, now, |ledger| {
        Ok((roll_daily_window(ledger, now, &calendar), ()))
    })
    .await?;

    state.event_bus.publish(ProgressEvent::ScoreObserved {
        user_id,
        level: row.level,
    });

    Ok(Json(DataResponse {
        data: ScoreView {
            total_score: row.total_score,
            level: row.level,
            daily_points: row.daily_points,
            daily_cap: DAILY_POINTS_CAP,
            remaining_today: (DAILY_POINTS_CAP - row.daily_points).max(0),
            last_reset_date: row.last_reset_date,
            score_history: row.score_history.0,
        },
    }))
}

/// POST /api/v1/users/{user_id}/score/points
///
/// Add points for an action. Hitting the daily cap is not an error: the
/// response is 200 with `success = false` and unchanged totals.
pub async fn add_points(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<AddPoints>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let outcome = award_points(&state, user_id, input.action.trim(), input.points, Utc::now()).await?;

    tracing::info!(
        user_id,
        action = %input.action,
        points_added = outcome.award().points_added,
        "Points requested"
    );

    Ok(Json(DataResponse {
        data: AddPointsResponse::from(outcome),
    }))
}
