use axum::routing::put;
use axum::Router;

use crate::handlers::workouts;
use crate::state::AppState;

/// Workout routes mounted at `/workouts`.
///
/// ```text
/// PUT    /{workout_id}    -> update_workout
/// DELETE /{workout_id}    -> delete_workout
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{workout_id}",
        put(workouts::update_workout).delete(workouts::delete_workout),
    )
}
