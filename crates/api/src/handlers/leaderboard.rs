//! Public leaderboard handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use pulsefit_core::leaderboard::{rank, validate_board, Contender};
use pulsefit_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/leaderboard/{board}
///
/// Ranks every public profile. The caller's own row, if public, carries
/// `is_current_user = true`.
pub async fn get_leaderboard(
    user: AuthUser,
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_board(&board)?;

    let contenders: Vec<Contender> = ProfileRepo::list_public(&state.pool)
        .await?
        .into_iter()
        .map(Contender::from)
        .collect();
    let entries = rank(contenders, user.user_id);

    tracing::debug!(board = %board, entries = entries.len(), "Leaderboard built");

    Ok(Json(DataResponse { data: entries }))
}
