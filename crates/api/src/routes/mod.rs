pub mod goals;
pub mod health;
pub mod leaderboard;
pub mod users;
pub mod workouts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every route requires a Bearer token. User-scoped routes only accept the
/// token's own user id; goal and workout routes only accept their owner.
///
/// ```text
/// /users/{user_id}                                 delete account
///     /streak                                      streak status
///     /streak/activity                             evaluate an activity (POST)
///     /score                                       points ledger
///     /score/points                                add points (POST)
///     /goals                                       list, create
///     /logs                                        list (?type, start_date, end_date), record
///     /workouts                                    list, create
///     /profile                                     level and visibility
///     /profile/visibility                          opt in/out of leaderboard (PUT)
///
/// /goals/{goal_id}                                 delete
///     /progress                                    record progress (PUT)
///     /abandon                                     abandon (PUT)
///
/// /workouts/{workout_id}                           update (rewards), delete
///
/// /leaderboard/{board}                             public ranking
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/goals", goals::router())
        .nest("/workouts", workouts::router())
        .nest("/leaderboard", leaderboard::router())
}
