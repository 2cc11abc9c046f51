//! Handlers for workouts.
//!
//! Creating a workout earns nothing. Points are granted when a workout is
//! updated, once per exercise and once per set, and a newly rewarded
//! exercise counts as the day's workout for the streak.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pulsefit_core::error::CoreError;
use pulsefit_core::points::ACTION_ADD_WORKOUT;
use pulsefit_core::streak::StreakActivity;
use pulsefit_core::types::DbId;
use pulsefit_core::workout::{
    reconcile_rewards, unrewarded, validate_exercises, validate_workout_name,
};
use pulsefit_db::models::workout::{CreateWorkout, UpdateWorkout, Workout};
use pulsefit_db::repositories::WorkoutRepo;
use serde::Serialize;
use sqlx::types::Json as SqlJson;

use crate::error::{AppError, AppResult};
use crate::handlers::score::AddPointsResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::progression::{try_award_points, try_record_streak_activity, StreakUpdate};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WorkoutReward {
    pub exercise_points: i64,
    pub set_points: i64,
    pub counts_as_workout: bool,
}

impl WorkoutReward {
    pub fn total(&self) -> i64 {
        self.exercise_points + self.set_points
    }
}

#[derive(Debug, Serialize)]
pub struct WorkoutUpdateResponse {
    pub workout: Workout,
    pub reward: WorkoutReward,
    pub points: Option<AddPointsResponse>,
    pub streak: Option<StreakUpdate>,
}

fn validate_duration(duration_mins: Option<i32>) -> Result<(), CoreError> {
    match duration_mins {
        Some(d) if d < 0 => Err(CoreError::Validation(
            "Duration must not be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Load a workout and check that `user` owns it. 404 before 403.
async fn find_owned(state: &AppState, user: &AuthUser, workout_id: DbId) -> AppResult<Workout> {
    let workout = WorkoutRepo::find_by_id(&state.pool, workout_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workout",
            id: workout_id,
        }))?;
    ensure_owner(user, workout.user_id)?;
    Ok(workout)
}

/// GET /api/v1/users/{user_id}/workouts
pub async fn list_workouts(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let workouts = WorkoutRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: workouts }))
}

/// POST /api/v1/users/{user_id}/workouts
pub async fn create_workout(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<CreateWorkout>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    validate_workout_name(&input.name)?;
    validate_exercises(&input.exercises)?;
    validate_duration(input.duration_mins)?;

    let exercises = unrewarded(input.exercises);
    let workout = WorkoutRepo::create(
        &state.pool,
        user_id,
        input.name.trim(),
        &exercises,
        input.duration_mins,
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(user_id, workout_id = workout.id, "Workout created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: workout })))
}

/// PUT /api/v1/workouts/{workout_id}
///
/// Omitted fields are left unchanged. When `exercises` is given, content not
/// rewarded before earns points under the `add_workout` action.
pub async fn update_workout(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateWorkout>,
) -> AppResult<impl IntoResponse> {
    let workout_id = parse_id(&raw_id, "Workout")?;
    let owner_id = find_owned(&state, &user, workout_id).await?.user_id;

    if let Some(name) = &input.name {
        validate_workout_name(name)?;
    }
    if let Some(exercises) = &input.exercises {
        validate_exercises(exercises)?;
    }
    validate_duration(input.duration_mins)?;

    let (workout, reward) = WorkoutRepo::modify::<_, _, AppError>(&state.pool, workout_id, |w| {
        if let Some(name) = input.name {
            w.name = name.trim().to_string();
        }
        if input.duration_mins.is_some() {
            w.duration_mins = input.duration_mins;
        }
        if input.notes.is_some() {
            w.notes = input.notes;
        }
        let mut reward = WorkoutReward::default();
        if let Some(incoming) = input.exercises {
            let reconciliation = reconcile_rewards(&w.exercises.0, incoming);
            reward = WorkoutReward {
                exercise_points: reconciliation.exercise_points,
                set_points: reconciliation.set_points,
                counts_as_workout: reconciliation.counts_as_workout(),
            };
            w.exercises = SqlJson(reconciliation.exercises);
        }
        Ok(reward)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Workout",
        id: workout_id,
    }))?;

    tracing::info!(
        user_id = owner_id,
        workout_id,
        points_earned = reward.total(),
        "Workout updated"
    );

    let now = Utc::now();
    let points = if reward.total() > 0 {
        try_award_points(&state, owner_id, ACTION_ADD_WORKOUT, reward.total(), now)
            .await
            .map(AddPointsResponse::from)
    } else {
        None
    };
    let streak = if reward.counts_as_workout {
        try_record_streak_activity(&state, owner_id, &StreakActivity::Workout, now).await
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: WorkoutUpdateResponse {
            workout,
            reward,
            points,
            streak,
        },
    }))
}

/// DELETE /api/v1/workouts/{workout_id}
pub async fn delete_workout(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let workout_id = parse_id(&raw_id, "Workout")?;
    find_owned(&state, &user, workout_id).await?;

    if !WorkoutRepo::delete(&state.pool, workout_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Workout",
            id: workout_id,
        }));
    }

    tracing::info!(user_id = user.user_id, workout_id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}
