//! Progression events and the broadcast channel that carries them.
//!
//! Handlers publish a [`ProgressEvent`] once their own transaction has
//! committed. Subscribers such as [`ProfileSync`](crate::ProfileSync) run as
//! background tasks, so a slow or failing subscriber never affects the
//! request.

use chrono::{DateTime, Utc};
use pulsefit_core::goal::GoalType;
use pulsefit_core::streak::StreakOutcome;
use pulsefit_core::types::DbId;
use serde::Serialize;
use tokio::sync::broadcast;

/// Something that changed a user's progression state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Points were applied to the ledger.
    PointsAwarded {
        user_id: DbId,
        action: String,
        points: i64,
        total_score: i64,
        level: i32,
        leveled_up: bool,
    },
    /// The ledger was read; carries the level as of that read.
    ScoreObserved { user_id: DbId, level: i32 },
    /// A qualifying activity was evaluated against the streak.
    StreakEvaluated {
        user_id: DbId,
        outcome: StreakOutcome,
        current_streak: i32,
        longest_streak: i32,
    },
    /// A goal milestone was reached for the first time.
    MilestoneAchieved {
        user_id: DbId,
        goal_id: DbId,
        goal_type: GoalType,
        index: usize,
        reward: String,
    },
    /// A goal reached its target.
    GoalCompleted { user_id: DbId, goal_id: DbId },
}

impl ProgressEvent {
    /// The user the event concerns.
    pub fn user_id(&self) -> DbId {
        match self {
            Self::PointsAwarded { user_id, .. }
            | Self::ScoreObserved { user_id, .. }
            | Self::StreakEvaluated { user_id, .. }
            | Self::MilestoneAchieved { user_id, .. }
            | Self::GoalCompleted { user_id, .. } => *user_id,
        }
    }

    /// Short stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointsAwarded { .. } => "points_awarded",
            Self::ScoreObserved { .. } => "score_observed",
            Self::StreakEvaluated { .. } => "streak_evaluated",
            Self::MilestoneAchieved { .. } => "milestone_achieved",
            Self::GoalCompleted { .. } => "goal_completed",
        }
    }

    /// The ledger level carried by the event, if it carries one.
    pub fn level(&self) -> Option<i32> {
        match self {
            Self::PointsAwarded { level, .. } | Self::ScoreObserved { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// A [`ProgressEvent`] stamped with its publication time.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedEvent {
    #[serde(flatten)]
    pub event: ProgressEvent,
    pub published_at: DateTime<Utc>,
}

const BACKLOG: usize = 1024;

/// Fan-out of [`PublishedEvent`]s to every live subscriber.
///
/// A subscriber more than the backlog behind loses the oldest events and sees
/// `RecvError::Lagged` on its next receive.
pub struct EventBus {
    sender: broadcast::Sender<PublishedEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Stamp and broadcast `event`. Dropped silently when nobody listens.
    pub fn publish(&self, event: ProgressEvent) {
        tracing::debug!(event = event.name(), user_id = event.user_id(), "Publishing event");
        let _ = self.sender.send(PublishedEvent {
            event,
            published_at: Utc::now(),
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(BACKLOG)
    }
}
