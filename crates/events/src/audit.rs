//! Structured audit trail of progression events.
//!
//! [`ActivityAudit`] writes one `info` line per event under the
//! `pulsefit_events::audit` target, so streak, milestone and goal changes
//! can be followed in the log stream without touching the database.

use tokio::sync::broadcast;

use crate::bus::{ProgressEvent, PublishedEvent};

pub struct ActivityAudit;

impl ActivityAudit {
    /// Record events until the bus closes; returns how many were recorded.
    pub async fn run(mut receiver: broadcast::Receiver<PublishedEvent>) -> u64 {
        let mut recorded = 0;
        loop {
            match receiver.recv().await {
                Ok(published) => {
                    Self::record(&published);
                    recorded += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity audit lagged behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!(recorded, "Activity audit stopped");
        recorded
    }

    fn record(published: &PublishedEvent) {
        let at = published.published_at;
        match &published.event {
            ProgressEvent::PointsAwarded {
                user_id,
                action,
                points,
                total_score,
                level,
                leveled_up,
            } => tracing::info!(
                target: "pulsefit_events::audit",
                user_id, %action, points, total_score, level, leveled_up, %at,
                "Points awarded"
            ),
            ProgressEvent::ScoreObserved { user_id, level } => tracing::debug!(
                target: "pulsefit_events::audit",
                user_id, level, %at,
                "Score observed"
            ),
            ProgressEvent::StreakEvaluated {
                user_id,
                outcome,
                current_streak,
                longest_streak,
            } => tracing::info!(
                target: "pulsefit_events::audit",
                user_id, ?outcome, current_streak, longest_streak, %at,
                "Streak evaluated"
            ),
            ProgressEvent::MilestoneAchieved {
                user_id,
                goal_id,
                goal_type,
                index,
                reward,
            } => tracing::info!(
                target: "pulsefit_events::audit",
                user_id, goal_id, goal_type = goal_type.as_str(), index, %reward, %at,
                "Goal milestone achieved"
            ),
            ProgressEvent::GoalCompleted { user_id, goal_id } => tracing::info!(
                target: "pulsefit_events::audit",
                user_id, goal_id, %at,
                "Goal completed"
            ),
        }
    }
}
