//! Handlers for fitness goals: creation, progress updates, abandonment.
//!
//! Milestones and completion produced by a progress update are published
//! on the event bus after the goal row is committed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pulsefit_core::calendar::Calendar;
use pulsefit_core::error::CoreError;
use pulsefit_core::goal::{self, GoalDraft, GoalType, MilestoneEvent};
use pulsefit_core::types::{DbId, Timestamp};
use pulsefit_db::models::goal::{AbandonGoal, CreateGoal, Goal, UpdateGoalProgress};
use pulsefit_db::repositories::GoalRepo;
use pulsefit_events::ProgressEvent;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::ensure_owner;
use crate::path::parse_id;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A goal row plus its derived progress figures.
#[derive(Debug, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: f64,
    /// `None` when the goal spans less than one calendar day.
    pub is_on_track: Option<bool>,
}

impl GoalView {
    fn build(goal: Goal, now: Timestamp, calendar: &Calendar) -> Result<Self, CoreError> {
        let domain = goal.to_domain()?;
        let is_on_track = match goal::is_on_track(&domain, now, calendar) {
            Ok(on_track) => Some(on_track),
            Err(e) => {
                tracing::debug!(goal_id = goal.id, error = %e, "On-track check skipped");
                None
            }
        };
        Ok(Self {
            progress: goal::progress_percent(&domain),
            is_on_track,
            goal,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub goal: GoalView,
    pub milestones_achieved: Vec<MilestoneEvent>,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a goal and check that `user` owns it. 404 before 403.
async fn find_owned(state: &AppState, user: &AuthUser, goal_id: DbId) -> AppResult<Goal> {
    let goal = GoalRepo::find_by_id(&state.pool, goal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Goal",
            id: goal_id,
        }))?;
    ensure_owner(user, goal.user_id)?;
    Ok(goal)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{user_id}/goals
pub async fn list_goals(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let now = Utc::now();
    let goals = GoalRepo::list_by_user(&state.pool, user_id)
        .await?
        .into_iter()
        .map(|g| GoalView::build(g, now, state.calendar()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DataResponse { data: goals }))
}

/// POST /api/v1/users/{user_id}/goals
///
/// Creates an in-progress goal starting now, with four milestones and a
/// motivational quote picked for the goal type unless one is supplied.
pub async fn create_goal(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<CreateGoal>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "User")?;
    ensure_owner(&user, user_id)?;

    let goal_type: GoalType = input.goal_type.parse()?;
    let motivation = input.motivation.unwrap_or_default();
    let now = Utc::now();
    let draft = GoalDraft {
        goal_type,
        target_date: input.target_date,
        start_value: input.start_value,
        target_value: input.target_value,
        unit: input.unit,
        quote: motivation.quote,
        reminder: motivation.reminder,
    };
    let new_goal = goal::Goal::create(draft, now)?;

    let row = GoalRepo::create(&state.pool, user_id, &new_goal).await?;

    tracing::info!(user_id, goal_id = row.id, goal_type = goal_type.as_str(), "Goal created");

    let view = GoalView::build(row, now, state.calendar())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// PUT /api/v1/goals/{goal_id}/progress
///
/// Records a new current value. Newly crossed milestones and completion are
/// returned and published.
pub async fn update_progress(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateGoalProgress>,
) -> AppResult<impl IntoResponse> {
    let goal_id = parse_id(&raw_id, "Goal")?;
    find_owned(&state, &user, goal_id).await?;

    let now = Utc::now();
    let (row, update) = GoalRepo::modify::<_, _, AppError>(&state.pool, goal_id, |g| {
        Ok(goal::apply_progress_update(
            g,
            input.current_value,
            input.note.as_deref(),
            now,
        )?)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Goal",
        id: goal_id,
    }))?;

    let goal_type: GoalType = row.goal_type.parse()?;
    for milestone in &update.milestones_achieved {
        state.event_bus.publish(ProgressEvent::MilestoneAchieved {
            user_id: row.user_id,
            goal_id,
            goal_type,
            index: milestone.index,
            reward: milestone.reward.clone(),
        });
    }
    if update.completed {
        state.event_bus.publish(ProgressEvent::GoalCompleted {
            user_id: row.user_id,
            goal_id,
        });
    }

    tracing::info!(
        user_id = user.user_id,
        goal_id,
        current_value = input.current_value,
        milestones = update.milestones_achieved.len(),
        completed = update.completed,
        "Goal progress updated"
    );

    Ok(Json(DataResponse {
        data: ProgressResponse {
            goal: GoalView::build(row, now, state.calendar())?,
            milestones_achieved: update.milestones_achieved,
            completed: update.completed,
        },
    }))
}

/// PUT /api/v1/goals/{goal_id}/abandon
///
/// The body, and the reason inside it, are optional.
pub async fn abandon_goal(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Option<Json<AbandonGoal>>,
) -> AppResult<impl IntoResponse> {
    let goal_id = parse_id(&raw_id, "Goal")?;
    find_owned(&state, &user, goal_id).await?;

    let reason = body.and_then(|Json(input)| input.reason);
    let now = Utc::now();
    let (row, ()) = GoalRepo::modify::<_, _, AppError>(&state.pool, goal_id, |g| {
        Ok(goal::abandon(g, reason.as_deref(), now)?)
    })
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Goal",
        id: goal_id,
    }))?;

    tracing::info!(user_id = user.user_id, goal_id, "Goal abandoned");

    Ok(Json(DataResponse {
        data: GoalView::build(row, now, state.calendar())?,
    }))
}

/// DELETE /api/v1/goals/{goal_id}
pub async fn delete_goal(
    user: AuthUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let goal_id = parse_id(&raw_id, "Goal")?;
    find_owned(&state, &user, goal_id).await?;

    if !GoalRepo::delete(&state.pool, goal_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Goal",
            id: goal_id,
        }));
    }

    tracing::info!(user_id = user.user_id, goal_id, "Goal deleted");
    Ok(StatusCode::NO_CONTENT)
}
