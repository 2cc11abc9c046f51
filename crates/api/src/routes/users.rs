//! User-scoped routes mounted at `/users`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{goals, logs, score, streak, users, workouts};
use crate::state::AppState;

/// ```text
/// DELETE /{user_id}                        -> delete_account
/// GET    /{user_id}/streak                 -> get_streak
/// POST   /{user_id}/streak/activity        -> record_activity
/// GET    /{user_id}/score                  -> get_score
/// POST   /{user_id}/score/points           -> add_points
/// GET    /{user_id}/goals                  -> list_goals
/// POST   /{user_id}/goals                  -> create_goal
/// GET    /{user_id}/logs                   -> list_logs
/// POST   /{user_id}/logs                   -> create_log
/// GET    /{user_id}/workouts               -> list_workouts
/// POST   /{user_id}/workouts               -> create_workout
/// GET    /{user_id}/profile                -> get_profile
/// PUT    /{user_id}/profile/visibility     -> set_visibility
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", delete(users::delete_account))
        .route("/{user_id}/streak", get(streak::get_streak))
        .route("/{user_id}/streak/activity", post(streak::record_activity))
        .route("/{user_id}/score", get(score::get_score))
        .route("/{user_id}/score/points", post(score::add_points))
        .route(
            "/{user_id}/goals",
            get(goals::list_goals).post(goals::create_goal),
        )
        .route("/{user_id}/logs", get(logs::list_logs).post(logs::create_log))
        .route(
            "/{user_id}/workouts",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route("/{user_id}/profile", get(users::get_profile))
        .route("/{user_id}/profile/visibility", put(users::set_visibility))
}
