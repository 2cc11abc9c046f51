use axum::routing::get;
use axum::Router;

use crate::handlers::leaderboard;
use crate::state::AppState;

/// Leaderboard routes mounted at `/leaderboard`.
///
/// ```text
/// GET    /{board}    -> get_leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{board}", get(leaderboard::get_leaderboard))
}
