//! Goal row model and DTOs.

use pulsefit_core::error::CoreError;
use pulsefit_core::goal::{self, GoalNote, Milestone, Motivation, Reminder, WeeklyProgress};
use pulsefit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Goal {
    pub id: DbId,
    pub user_id: DbId,
    pub goal_type: String,
    pub status: String,
    pub start_date: Timestamp,
    pub target_date: Timestamp,
    pub start_value: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub milestones: Json<Vec<Milestone>>,
    pub weekly_progress: Json<Vec<WeeklyProgress>>,
    pub notes: Json<Vec<GoalNote>>,
    pub motivation: Json<Motivation>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Goal {
    /// Convert the row into the domain goal.
    ///
    /// Fails only if the stored type or status is not a known name, which
    /// the table's CHECK constraints rule out.
    pub fn to_domain(&self) -> Result<goal::Goal, CoreError> {
        Ok(goal::Goal {
            goal_type: self.goal_type.parse()?,
            status: self.status.parse()?,
            start_date: self.start_date,
            target_date: self.target_date,
            start_value: self.start_value,
            current_value: self.current_value,
            target_value: self.target_value,
            unit: self.unit.clone(),
            milestones: self.milestones.0.clone(),
            weekly_progress: self.weekly_progress.0.clone(),
            notes: self.notes.0.clone(),
            motivation: self.motivation.0.clone(),
        })
    }
}

/// Motivation overrides supplied on creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MotivationInput {
    pub quote: Option<String>,
    pub reminder: Option<Reminder>,
}

/// DTO for creating a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGoal {
    /// Canonical name, display label or client alias.
    #[serde(rename = "type")]
    pub goal_type: String,
    pub target_date: Timestamp,
    pub start_value: f64,
    pub target_value: f64,
    pub unit: String,
    #[serde(default)]
    pub motivation: Option<MotivationInput>,
}

/// DTO for recording progress.
#[derive(Debug, Deserialize)]
pub struct UpdateGoalProgress {
    pub current_value: f64,
    pub note: Option<String>,
}

/// DTO for abandoning a goal.
#[derive(Debug, Default, Deserialize)]
pub struct AbandonGoal {
    pub reason: Option<String>,
}
