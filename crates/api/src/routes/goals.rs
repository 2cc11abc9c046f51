use axum::routing::{delete, put};
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Goal routes mounted at `/goals`.
///
/// ```text
/// DELETE /{goal_id}             -> delete_goal
/// PUT    /{goal_id}/progress    -> update_progress
/// PUT    /{goal_id}/abandon     -> abandon_goal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{goal_id}", delete(goals::delete_goal))
        .route("/{goal_id}/progress", put(goals::update_progress))
        .route("/{goal_id}/abandon", put(goals::abandon_goal))
}
