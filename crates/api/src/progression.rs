//! Streak and points updates shared by several handlers.
//!
//! Each function runs one locked read-modify-write through the repository
//! and publishes the matching [`ProgressEvent`] after commit. The `try_*`
//! variants are for side effects of another write: they log failures and
//! return `None` instead of failing the caller.

use pulsefit_core::points::{add_points, PointsOutcome};
use pulsefit_core::streak::{evaluate, StreakActivity, StreakOutcome};
use pulsefit_core::types::{DbId, Timestamp};
use pulsefit_db::repositories::{ScoreRepo, StreakRepo};
use pulsefit_events::ProgressEvent;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Streak summary returned after evaluating an activity.
#[derive(Debug, Clone, Serialize)]
pub struct StreakUpdate {
    pub outcome: StreakOutcome,
    pub message: &'static str,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Timestamp>,
}

/// Evaluate `activity` against the user's streak at `now` and persist the result.
pub async fn record_streak_activity(
    state: &AppState,
    user_id: DbId,
    activity: &StreakActivity,
    now: Timestamp,
) -> Result<StreakUpdate, AppError> {
    let calendar = *state.calendar();
    let (row, outcome) = StreakRepo::modify::<_, _, AppError>(&state.pool, user_id, |streak| {
        let evaluation = evaluate(streak, activity, now, &calendar);
        let changed = evaluation.state != *streak;
        *streak = evaluation.state;
        Ok((changed, evaluation.outcome))
    })
    .await?;

    if outcome != StreakOutcome::NotQualifying {
        state.event_bus.publish(ProgressEvent::StreakEvaluated {
            user_id,
            outcome,
            current_streak: row.current_streak,
            longest_streak: row.longest_streak,
        });
    }

    tracing::debug!(
        user_id,
        outcome = ?outcome,
        current_streak = row.current_streak,
        "Evaluated streak activity"
    );

    Ok(StreakUpdate {
        outcome,
        message: outcome.message(),
        current_streak: row.current_streak,
        longest_streak: row.longest_streak,
        last_activity_date: row.last_activity_date,
    })
}

/// Apply `raw_points` for `action` to the user's ledger at `now`.
pub async fn award_points(
    state: &AppState,
    user_id: DbId,
    action: &str,
    raw_points: i64,
    now: Timestamp,
) -> Result<PointsOutcome, AppError> {
    let calendar = *state.calendar();
    let (_, outcome) = ScoreRepo::modify::<_, _, AppError>(&state.pool, user_id, now, |ledger| {
        let before = ledger.clone();
        let outcome = add_points(ledger, action, raw_points, now, &calendar)?;
        Ok((*ledger != before, outcome))
    })
    .await?;

    match &outcome {
        PointsOutcome::Added(award) => {
            if award.leveled_up {
                tracing::info!(user_id, level = award.level, "User leveled up");
            }
            state.event_bus.publish(ProgressEvent::PointsAwarded {
                user_id,
                action: action.to_string(),
                points: award.points_added,
                total_score: award.total_score,
                level: award.level,
                leveled_up: award.leveled_up,
            });
        }
        PointsOutcome::DailyCapReached(_) => {
            tracing::debug!(user_id, action, "Daily points cap reached");
        }
    }

    Ok(outcome)
}

/// [`record_streak_activity`] as a side effect. Failures are logged.
pub async fn try_record_streak_activity(
    state: &AppState,
    user_id: DbId,
    activity: &StreakActivity,
    now: Timestamp,
) -> Option<StreakUpdate> {
    match record_streak_activity(state, user_id, activity, now).await {
        Ok(update) => Some(update),
        Err(e) => {
            tracing::warn!(error = %e, user_id, "Failed to update streak");
            None
        }
    }
}

/// [`award_points`] as a side effect. Failures are logged.
pub async fn try_award_points(
    state: &AppState,
    user_id: DbId,
    action: &str,
    raw_points: i64,
    now: Timestamp,
) -> Option<PointsOutcome> {
    match award_points(state, user_id, action, raw_points, now).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::warn!(error = %e, user_id, action, raw_points, "Failed to award points");
            None
        }
    }
}
