//! Workout content and one-time reward reconciliation.
//!
//! Points for a workout are granted on update, never on creation, and each
//! exercise and set is rewarded at most once. The `points_awarded` flags
//! stored with the workout are what make re-saving the same content free.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::points::{POINTS_PER_EXERCISE, POINTS_PER_SET};

/// Maximum length of a workout or exercise name.
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub reps: i32,
    pub weight: f64,
    #[serde(default)]
    pub points_awarded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub points_awarded: bool,
}

/// Set as submitted by a client. Reward flags are server-owned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetInput {
    pub reps: i32,
    pub weight: f64,
}

/// Exercise as submitted by a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validate a workout name.
pub fn validate_workout_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Workout name is required".to_string()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Workout name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate submitted exercises.
pub fn validate_exercises(exercises: &[ExerciseInput]) -> Result<(), CoreError> {
    for (i, exercise) in exercises.iter().enumerate() {
        if exercise.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Exercise {} is missing a name",
                i + 1
            )));
        }
        for set in &exercise.sets {
            if set.reps < 0 || !set.weight.is_finite() || set.weight < 0.0 {
                return Err(CoreError::Validation(format!(
                    "Exercise '{}' has a set with negative reps or weight",
                    exercise.name
                )));
            }
        }
    }
    Ok(())
}

/// Exercises without any reward, as stored on workout creation.
pub fn unrewarded(exercises: Vec<ExerciseInput>) -> Vec<Exercise> {
    exercises
        .into_iter()
        .map(|e| Exercise {
            name: e.name,
            sets: e
                .sets
                .into_iter()
                .map(|s| ExerciseSet {
                    reps: s.reps,
                    weight: s.weight,
                    points_awarded: false,
                })
                .collect(),
            notes: e.notes,
            points_awarded: false,
        })
        .collect()
}

/// Result of [`reconcile_rewards`].
#[derive(Debug, Clone, PartialEq)]
pub struct RewardReconciliation {
    /// The incoming exercises with reward flags set.
    pub exercises: Vec<Exercise>,
    pub exercise_points: i64,
    pub set_points: i64,
}

impl RewardReconciliation {
    pub fn total_points(&self) -> i64 {
        self.exercise_points + self.set_points
    }

    /// A newly rewarded exercise counts as a workout for the streak.
    pub fn counts_as_workout(&self) -> bool {
        self.exercise_points > 0
    }
}

/// Compare `incoming` against the stored `existing` exercises and award
/// points for content that has not been rewarded yet.
///
/// An incoming exercise is matched to an existing one by name, falling back
/// to the exercise at the same position. Sets are matched by position within
/// the matched exercise.
pub fn reconcile_rewards(existing: &[Exercise], incoming: Vec<ExerciseInput>) -> RewardReconciliation {
    let mut exercise_points = 0;
    let mut set_points = 0;

    let exercises = incoming
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            let matched = existing
                .iter()
                .find(|e| e.name == input.name)
                .or_else(|| existing.get(i));

            if !matched.is_some_and(|e| e.points_awarded) {
                exercise_points += POINTS_PER_EXERCISE;
            }

            let existing_sets = matched.map(|e| e.sets.as_slice()).unwrap_or_default();
            let sets = input
                .sets
                .into_iter()
                .enumerate()
                .map(|(j, set)| {
                    if !existing_sets.get(j).is_some_and(|s| s.points_awarded) {
                        set_points += POINTS_PER_SET;
                    }
                    ExerciseSet {
                        reps: set.reps,
                        weight: set.weight,
                        points_awarded: true,
                    }
                })
                .collect();

            Exercise {
                name: input.name,
                sets,
                notes: input.notes,
                points_awarded: true,
            }
        })
        .collect();

    RewardReconciliation {
        exercises,
        exercise_points,
        set_points,
    }
}
