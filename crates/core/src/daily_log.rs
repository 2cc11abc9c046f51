//! Daily health logs (weight, water, steps, sleep).
//!
//! One value per kind per calendar day; logging again the same day
//! overwrites it. Each log earns points and steps logs feed the streak.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::points::{
    steps_points, ACTION_LOG_OTHER, ACTION_LOG_STEPS, ACTION_LOG_WATER, ACTION_LOG_WEIGHT,
    POINTS_OTHER_LOG, POINTS_WATER_LOG, POINTS_WEIGHT_LOG,
};
use crate::streak::StreakActivity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Weight,
    WaterIntake,
    Steps,
    Sleep,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::WaterIntake => "water_intake",
            Self::Steps => "steps",
            Self::Sleep => "sleep",
        }
    }

    /// Unit stored when the client does not send one.
    pub fn default_unit(&self) -> &'static str {
        match self {
            Self::Weight => "kg",
            Self::WaterIntake => "ml",
            Self::Steps => "steps",
            Self::Sleep => "hours",
        }
    }

    /// Score history action for a log of this kind.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Weight => ACTION_LOG_WEIGHT,
            Self::WaterIntake => ACTION_LOG_WATER,
            Self::Steps => ACTION_LOG_STEPS,
            Self::Sleep => ACTION_LOG_OTHER,
        }
    }

    /// Points earned for logging `value` of this kind.
    pub fn points_for(&self, value: f64) -> i64 {
        match self {
            Self::Weight => POINTS_WEIGHT_LOG,
            Self::WaterIntake => POINTS_WATER_LOG,
            Self::Steps => steps_points(value),
            Self::Sleep => POINTS_OTHER_LOG,
        }
    }

    /// Streak activity triggered by a log, if any. Only steps count.
    pub fn streak_activity(&self, value: f64) -> Option<StreakActivity> {
        match self {
            Self::Steps => Some(StreakActivity::Steps(value)),
            _ => None,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weight" => Ok(Self::Weight),
            "water" | "water_intake" => Ok(Self::WaterIntake),
            "steps" => Ok(Self::Steps),
            "sleep" => Ok(Self::Sleep),
            other => Err(CoreError::Validation(format!("Invalid log type: '{other}'"))),
        }
    }
}

/// Validate a logged value. Values must be finite and non-negative.
pub fn validate_value(kind: LogKind, value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation("Value must be a number".to_string()));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{kind} value must not be negative"
        )));
    }
    Ok(value)
}

/// The unit to store: the client's when given, else the kind's default.
pub fn resolve_unit(kind: LogKind, unit: Option<&str>) -> String {
    unit.map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(kind.default_unit())
        .to_string()
}
