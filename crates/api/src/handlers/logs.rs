//! Handlers for daily health logs.
//!
//! A log is the primary write; the points award and, for steps, the streak
//! evaluation that follow it are best-effort and reported as `null` when
//! they fail.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pulsefit_core::daily_log::{resolve_unit, validate_value, LogKind};
use pulsefit_core::error::CoreError;
use pulsefit_db::models::daily_log::{CreateDailyLog, DailyLog, DailyLogFilter};
use pulsefit_db::repositories::DailyLogRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::score::AddPointsResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::progression::{try_award_points, try_record_streak_activity, StreakUpdate};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub log: DailyLog,
    /// `false` when an existing log for the same day was overwritten.
    pub created: bool,
    pub points: Option<AddPointsResponse>,
    pub streak: Option<StreakUpdate>,
}

/// GET /api/v1/users/{user_id}/logs?type=&start_date=&end_date=
pub async fn list_logs(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(filter): Query<DailyLogFilter>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let kind = filter.kind.as_deref().map(str::parse::<LogKind>).transpose()?;
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(CoreError::Validation("start_date must not be after end_date".into()).into());
        }
    }

    let logs =
        DailyLogRepo::list(&state.pool, user_id, kind, filter.start_date, filter.end_date).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// POST /api/v1/users/{user_id}/logs
///
/// Records today's value for a kind, replacing any earlier value from the
/// same day. Returns 201 for a new log and 200 for an overwrite.
pub async fn create_log(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<CreateDailyLog>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let kind: LogKind = input.kind.parse()?;
    let value = validate_value(kind, input.value)?;
    let unit = resolve_unit(kind, input.unit.as_deref());

    let now = Utc::now();
    let log_date = state.calendar().local_date(now);
    let upserted =
        DailyLogRepo::upsert(&state.pool, user_id, kind, value, &unit, log_date, now).await?;

    tracing::info!(
        user_id,
        log_id = upserted.log.id,
        kind = kind.as_str(),
        value,
        created = upserted.inserted,
        "Daily log recorded"
    );

    let raw_points = kind.points_for(value);
    let points = if raw_points > 0 {
        try_award_points(&state, user_id, kind.action(), raw_points, now)
            .await
            .map(AddPointsResponse::from)
    } else {
        None
    };

    let streak = match kind.streak_activity(value) {
        Some(activity) => try_record_streak_activity(&state, user_id, &activity, now).await,
        None => None,
    };

    let status = if upserted.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(DataResponse {
            data: LogResponse {
                log: upserted.log,
                created: upserted.inserted,
                points,
                streak,
            },
        }),
    ))
}
