//! Handlers for the account and its public profile.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pulsefit_core::error::CoreError;
use pulsefit_db::models::user_profile::SetVisibility;
use pulsefit_db::repositories::{ProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/{user_id}/profile
pub async fn get_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let profile = ProfileRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/users/{user_id}/profile/visibility
///
/// Opt in to or out of the public leaderboard.
pub async fn set_visibility(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<SetVisibility>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let profile = ProfileRepo::set_visibility(&state.pool, user_id, input.public_profile).await?;

    tracing::info!(user_id, public_profile = input.public_profile, "Profile visibility changed");

    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/users/{user_id}
///
/// Deletes the account. Streak, ledger, goals, workouts, logs and profile
/// go with it.
pub async fn delete_account(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    if !UserRepo::delete(&state.pool, user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    tracing::info!(user_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
