//! Gamification points ledger: daily cap, history, and level curve.

use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum points a user can earn per calendar day.
pub const DAILY_POINTS_CAP: i64 = 300;

/// Experience points mirrored into the profile per level.
pub const EXPERIENCE_PER_LEVEL: i64 = 100;

// ---------------------------------------------------------------------------
// Actions and schedule
// ---------------------------------------------------------------------------

/// Action name recorded for a weight log.
pub const ACTION_LOG_WEIGHT: &str = "log_weight";
/// Action name recorded for a water intake log.
pub const ACTION_LOG_WATER: &str = "log_water";
/// Action name recorded for a steps log.
pub const ACTION_LOG_STEPS: &str = "log_steps";
/// Action name recorded for any other log kind.
pub const ACTION_LOG_OTHER: &str = "log_other";
/// Action name recorded for newly rewarded workout content.
pub const ACTION_ADD_WORKOUT: &str = "add_workout";

/// Points for a weight log.
pub const POINTS_WEIGHT_LOG: i64 = 20;
/// Points for a water intake log.
pub const POINTS_WATER_LOG: i64 = 15;
/// Points for any other log kind.
pub const POINTS_OTHER_LOG: i64 = 10;
/// Points per full 1000 steps.
pub const POINTS_PER_THOUSAND_STEPS: i64 = 10;
/// Ceiling for a single steps log.
pub const MAX_STEPS_LOG_POINTS: i64 = 50;
/// Points per newly rewarded workout exercise.
pub const POINTS_PER_EXERCISE: i64 = 50;
/// Points per newly rewarded workout set.
pub const POINTS_PER_SET: i64 = 10;

/// Points earned for a steps log of `steps`.
///
/// Negative or non-finite inputs earn nothing.
pub fn steps_points(steps: f64) -> i64 {
    if !steps.is_finite() || steps <= 0.0 {
        return 0;
    }
    let thousands = (steps / 1000.0).floor() as i64;
    (thousands * POINTS_PER_THOUSAND_STEPS).min(MAX_STEPS_LOG_POINTS)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One appended history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: Timestamp,
    pub action: String,
    pub points: i64,
}

/// Per-user points ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsLedger {
    pub total_score: i64,
    pub level: i32,
    pub daily_points: i64,
    pub last_reset_date: Timestamp,
    pub score_history: Vec<ScoreEntry>,
}

impl PointsLedger {
    /// An empty ledger whose daily window opens at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            total_score: 0,
            level: 1,
            daily_points: 0,
            last_reset_date: now,
            score_history: Vec::new(),
        }
    }
}

/// Level for a total score: `floor(1 + sqrt(total / 100))`.
pub fn level_for_score(total_score: i64) -> i32 {
    let total = total_score.max(0) as f64;
    (1.0 + (total / 100.0).sqrt()).floor() as i32
}

/// Experience points mirrored into the user profile for `level`.
pub fn experience_for_level(level: i32) -> i64 {
    i64::from(level) * EXPERIENCE_PER_LEVEL
}

/// Reset the daily window if `now` is on a later calendar day than the last
/// reset. Returns `true` when the ledger was changed.
pub fn roll_daily_window(ledger: &mut PointsLedger, now: Timestamp, calendar: &Calendar) -> bool {
    if calendar.same_day(ledger.last_reset_date, now) {
        return false;
    }
    ledger.daily_points = 0;
    ledger.last_reset_date = now;
    true
}

/// Totals reported after a points operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsAward {
    pub points_added: i64,
    pub total_score: i64,
    pub level: i32,
    pub daily_points: i64,
    pub leveled_up: bool,
}

/// Outcome of [`add_points`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointsOutcome {
    /// Points were applied (possibly trimmed to the remaining daily allowance).
    Added(PointsAward),
    /// The daily cap was already reached; totals are unchanged.
    DailyCapReached(PointsAward),
}

impl PointsOutcome {
    /// The totals carried by either variant.
    pub fn award(&self) -> &PointsAward {
        match self {
            Self::Added(award) | Self::DailyCapReached(award) => award,
        }
    }

    /// Whether any points were applied.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Apply `raw_points` for `action` to `ledger` at `now`.
///
/// The daily window is rolled first, then the cap trims the award. A ledger
/// already at the cap is left as is and reported as
/// [`PointsOutcome::DailyCapReached`].
pub fn add_points(
    ledger: &mut PointsLedger,
    action: &str,
    raw_points: i64,
    now: Timestamp,
    calendar: &Calendar,
) -> Result<PointsOutcome, CoreError> {
    if raw_points <= 0 {
        return Err(CoreError::Validation(format!(
            "Points must be a positive number, got {raw_points}"
        )));
    }
    if action.trim().is_empty() {
        return Err(CoreError::Validation("Action is required".to_string()));
    }

    roll_daily_window(ledger, now, calendar);

    if ledger.daily_points >= DAILY_POINTS_CAP {
        return Ok(PointsOutcome::DailyCapReached(PointsAward {
            points_added: 0,
            total_score: ledger.total_score,
            level: ledger.level,
            daily_points: ledger.daily_points,
            leveled_up: false,
        }));
    }

    let points_to_add = raw_points.min(DAILY_POINTS_CAP - ledger.daily_points);
    ledger.total_score += points_to_add;
    ledger.daily_points += points_to_add;
    ledger.score_history.push(ScoreEntry {
        date: now,
        action: action.to_string(),
        points: points_to_add,
    });

    let old_level = ledger.level;
    ledger.level = level_for_score(ledger.total_score);

    Ok(PointsOutcome::Added(PointsAward {
        points_added: points_to_add,
        total_score: ledger.total_score,
        level: ledger.level,
        daily_points: ledger.daily_points,
        leveled_up: ledger.level > old_level,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
