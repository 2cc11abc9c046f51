//! Workout row model and DTOs.

use pulsefit_core::types::{DbId, Timestamp};
use pulsefit_core::workout::{Exercise, ExerciseInput};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `workouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workout {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub exercises: Json<Vec<Exercise>>,
    pub duration_mins: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkout {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
    pub duration_mins: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for updating a workout. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkout {
    pub name: Option<String>,
    pub exercises: Option<Vec<ExerciseInput>>,
    pub duration_mins: Option<i32>,
    pub notes: Option<String>,
}
