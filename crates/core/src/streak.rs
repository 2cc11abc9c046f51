//! Consecutive-activity streak evaluation.
//!
//! [`evaluate`] decides how a single qualifying activity moves a user's
//! [`StreakState`]; [`assess`] decides what the stored state means at read
//! time (still alive, in grace, or broken).
//!
//! Day classification uses calendar days in the configured [`Calendar`].
//! Only the two-day gap is judged by elapsed wall-clock hours against
//! `grace_period_hours`, so a grace window longer than 24 hours is what
//! actually lets a streak survive a skipped day.

use serde::{Deserialize, Serialize};

use crate::calendar::{elapsed_hours, Calendar};
use crate::types::Timestamp;

/// Hours after the last activity during which a skipped day is forgiven.
pub const DEFAULT_GRACE_PERIOD_HOURS: i32 = 24;

/// Minimum daily step count that counts as a streak activity.
pub const DEFAULT_MINIMUM_STEPS_THRESHOLD: i32 = 3000;

/// Activity type string for workouts.
pub const ACTIVITY_WORKOUT: &str = "workout";
/// Activity type string for step counts.
pub const ACTIVITY_STEPS: &str = "steps";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Per-user streak state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Timestamp>,
    pub in_grace_period: bool,
    pub grace_period_hours: i32,
    pub minimum_steps_threshold: i32,
}

impl Default for StreakState {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            in_grace_period: false,
            grace_period_hours: DEFAULT_GRACE_PERIOD_HOURS,
            minimum_steps_threshold: DEFAULT_MINIMUM_STEPS_THRESHOLD,
        }
    }
}

/// An activity offered to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum StreakActivity {
    /// A completed workout. Always qualifies.
    Workout,
    /// A daily step count. Qualifies at or above the user's threshold.
    Steps(f64),
    /// Any other activity type. Never qualifies.
    Other(String),
}

impl StreakActivity {
    /// Build an activity from its wire-level type name and value.
    pub fn from_parts(activity_type: &str, value: f64) -> Self {
        match activity_type {
            ACTIVITY_WORKOUT => Self::Workout,
            ACTIVITY_STEPS => Self::Steps(value),
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this activity counts toward the streak under `state`'s threshold.
    pub fn qualifies(&self, state: &StreakState) -> bool {
        match self {
            Self::Workout => true,
            Self::Steps(value) => *value >= f64::from(state.minimum_steps_threshold),
            Self::Other(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// What an evaluated activity did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// The activity did not meet the threshold; state untouched.
    NotQualifying,
    /// First qualifying activity ever.
    Started,
    /// Another activity on the same calendar day.
    SameDay,
    /// Activity on the calendar day after the last one.
    Incremented,
    /// One skipped day, still inside the grace window.
    GraceMaintained,
    /// One skipped day, grace window expired.
    ResetGraceExpired,
    /// More than one skipped day.
    ResetMultiDay,
}

impl StreakOutcome {
    /// Whether the streak count itself changed.
    pub fn changed_streak(self) -> bool {
        matches!(
            self,
            Self::Started | Self::Incremented | Self::ResetGraceExpired | Self::ResetMultiDay
        )
    }

    /// Human-readable summary for API responses.
    pub fn message(self) -> &'static str {
        match self {
            Self::NotQualifying => "Activity does not meet threshold for streak",
            Self::Started => "First activity recorded, streak started",
            Self::SameDay => "Activity on same day, no streak change",
            Self::Incremented => "Streak incremented",
            Self::GraceMaintained => "Activity within grace period, streak maintained",
            Self::ResetGraceExpired => "Streak reset due to missed day",
            Self::ResetMultiDay => "Streak reset due to multiple missed days",
        }
    }
}

/// Result of [`evaluate`]: the next state plus what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakEvaluation {
    pub state: StreakState,
    pub outcome: StreakOutcome,
}

/// Compute the streak state after `activity` happens at `now`.
pub fn evaluate(
    state: &StreakState,
    activity: &StreakActivity,
    now: Timestamp,
    calendar: &Calendar,
) -> StreakEvaluation {
    if !activity.qualifies(state) {
        return StreakEvaluation {
            state: state.clone(),
            outcome: StreakOutcome::NotQualifying,
        };
    }

    let mut next = state.clone();
    next.in_grace_period = false;

    let Some(last) = state.last_activity_date else {
        next.current_streak = 1;
        next.longest_streak = next.longest_streak.max(1);
        next.last_activity_date = Some(now);
        return StreakEvaluation {
            state: next,
            outcome: StreakOutcome::Started,
        };
    };

    let day_diff = calendar.days_between(last, now);
    let outcome = match day_diff {
        // Negative means the clock moved backwards; treat like a repeat.
        d if d <= 0 => StreakOutcome::SameDay,
        1 => {
            next.current_streak += 1;
            next.longest_streak = next.longest_streak.max(next.current_streak);
            StreakOutcome::Incremented
        }
        2 => {
            if elapsed_hours(last, now) <= f64::from(state.grace_period_hours) {
                StreakOutcome::GraceMaintained
            } else {
                next.current_streak = 1;
                StreakOutcome::ResetGraceExpired
            }
        }
        _ => {
            next.current_streak = 1;
            StreakOutcome::ResetMultiDay
        }
    };

    // A decayed streak (current 0) restarting via grace still counts as one day.
    if next.current_streak == 0 {
        next.current_streak = 1;
    }
    next.longest_streak = next.longest_streak.max(next.current_streak);
    next.last_activity_date = Some(now);

    StreakEvaluation {
        state: next,
        outcome,
    }
}

// ---------------------------------------------------------------------------
// Read-time assessment
// ---------------------------------------------------------------------------

/// Streak status as seen when reading, without a new activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    /// No qualifying activity has ever been recorded.
    Inactive,
    /// A qualifying activity was recorded today.
    ActiveToday,
    /// Last activity was yesterday; an activity today extends the streak.
    /// Reported with `in_grace_period` set, like [`StreakStatus::InGrace`].
    Pending,
    /// A day was skipped but the grace window is still open.
    InGrace,
    /// The streak can no longer be extended.
    Broken,
}

/// Result of [`assess`].
#[derive(Debug, Clone, PartialEq)]
pub struct StreakAssessment {
    pub state: StreakState,
    pub status: StreakStatus,
    /// `true` when the assessment changed stored fields and should be saved.
    pub changed: bool,
}

/// Decide what `state` means at `now`.
///
/// A broken streak has its `current_streak` dropped to 0; `longest_streak`
/// is never touched.
pub fn assess(state: &StreakState, now: Timestamp, calendar: &Calendar) -> StreakAssessment {
    let mut next = state.clone();

    let status = match state.last_activity_date {
        None => StreakStatus::Inactive,
        Some(last) => match calendar.days_between(last, now) {
            d if d <= 0 => StreakStatus::ActiveToday,
            1 => StreakStatus::Pending,
            2 if elapsed_hours(last, now) <= f64::from(state.grace_period_hours) => {
                StreakStatus::InGrace
            }
            _ => StreakStatus::Broken,
        },
    };

    next.in_grace_period = matches!(status, StreakStatus::Pending | StreakStatus::InGrace);
    if status == StreakStatus::Broken {
        next.current_streak = 0;
    }

    let changed = next != *state;
    StreakAssessment {
        state: next,
        status,
        changed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    fn at(d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
    }

    fn cal() -> Calendar {
        Calendar::utc()
    }

    fn state_at(current: i32, longest: i32, last: Timestamp) -> StreakState {
        StreakState {
            current_streak: current,
            longest_streak: longest,
            last_activity_date: Some(last),
            ..StreakState::default()
        }
    }

    // -----------------------------------------------------------------------
    // Qualification
    // -----------------------------------------------------------------------

    #[test]
    fn steps_below_threshold_do_not_qualify() {
        let state = StreakState::default();
        let eval = evaluate(&state, &StreakActivity::Steps(2999.0), at(1, 9), &cal());
        assert_eq!(eval.outcome, StreakOutcome::NotQualifying);
        assert_eq!(eval.state, state);
    }

    #[test]
    fn steps_at_threshold_qualify() {
        let eval = evaluate(
            &StreakState::default(),
            &StreakActivity::Steps(3000.0),
            at(1, 9),
            &cal(),
        );
        assert_eq!(eval.outcome, StreakOutcome::Started);
    }

    #[test]
    fn unknown_activity_type_does_not_qualify() {
        let activity = StreakActivity::from_parts("water_intake", 5000.0);
        assert_matches!(activity, StreakActivity::Other(ref t) if t == "water_intake");
        let eval = evaluate(&StreakState::default(), &activity, at(1, 9), &cal());
        assert_eq!(eval.outcome, StreakOutcome::NotQualifying);
    }

    #[test]
    fn custom_threshold_is_respected() {
        let state = StreakState {
            minimum_steps_threshold: 8000,
            ..StreakState::default()
        };
        assert!(!StreakActivity::Steps(7999.0).qualifies(&state));
        assert!(StreakActivity::Steps(8000.0).qualifies(&state));
    }

    // -----------------------------------------------------------------------
    // Day classification
    // -----------------------------------------------------------------------

    #[test]
    fn first_steps_log_starts_streak() {
        let eval = evaluate(
            &StreakState::default(),
            &StreakActivity::Steps(3500.0),
            at(1, 9),
            &cal(),
        );
        assert_eq!(eval.outcome, StreakOutcome::Started);
        assert_eq!(eval.state.current_streak, 1);
        assert_eq!(eval.state.longest_streak, 1);
        assert_eq!(eval.state.last_activity_date, Some(at(1, 9)));
        assert!(!eval.state.in_grace_period);
    }

    #[test]
    fn next_calendar_day_increments() {
        let started = evaluate(
            &StreakState::default(),
            &StreakActivity::Steps(3500.0),
            at(1, 9),
            &cal(),
        );
        let eval = evaluate(&started.state, &StreakActivity::Steps(3500.0), at(2, 9), &cal());
        assert_eq!(eval.outcome, StreakOutcome::Incremented);
        assert_eq!(eval.state.current_streak, 2);
        assert_eq!(eval.state.longest_streak, 2);
    }

    #[test]
    fn next_day_across_midnight_increments_even_minutes_apart() {
        let last = Utc.with_ymd_and_hms(2024, 5, 1, 23, 58, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 0, 2, 0).unwrap();
        let eval = evaluate(&state_at(4, 4, last), &StreakActivity::Workout, now, &cal());
        assert_eq!(eval.outcome, StreakOutcome::Incremented);
        assert_eq!(eval.state.current_streak, 5);
    }

    #[test]
    fn same_day_only_refreshes_timestamp() {
        let state = state_at(3, 7, at(4, 8));
        let eval = evaluate(&state, &StreakActivity::Workout, at(4, 20), &cal());
        assert_eq!(eval.outcome, StreakOutcome::SameDay);
        assert_eq!(eval.state.current_streak, 3);
        assert_eq!(eval.state.longest_streak, 7);
        assert_eq!(eval.state.last_activity_date, Some(at(4, 20)));
    }

    #[test]
    fn increment_below_longest_keeps_longest() {
        let eval = evaluate(&state_at(2, 10, at(4, 8)), &StreakActivity::Workout, at(5, 8), &cal());
        assert_eq!(eval.state.current_streak, 3);
        assert_eq!(eval.state.longest_streak, 10);
    }

    #[test]
    fn skipped_day_within_custom_grace_is_maintained() {
        let state = StreakState {
            grace_period_hours: 48,
            ..state_at(5, 5, at(3, 20))
        };
        // Day 5 08:00 is 36 hours after day 3 20:00.
        let eval = evaluate(&state, &StreakActivity::Workout, at(5, 8), &cal());
        assert_eq!(eval.outcome, StreakOutcome::GraceMaintained);
        assert_eq!(eval.state.current_streak, 5);
        assert_eq!(eval.state.last_activity_date, Some(at(5, 8)));
    }

    #[test]
    fn skipped_day_past_grace_resets_to_one() {
        let state = state_at(5, 6, at(3, 8));
        // 48 hours > default 24.
        let eval = evaluate(&state, &StreakActivity::Workout, at(5, 8), &cal());
        assert_eq!(eval.outcome, StreakOutcome::ResetGraceExpired);
        assert_eq!(eval.state.current_streak, 1);
        assert_eq!(eval.state.longest_streak, 6);
    }

    #[test]
    fn skipping_three_days_resets_multi_day() {
        let state = state_at(9, 12, at(1, 10));
        let eval = evaluate(&state, &StreakActivity::Workout, at(5, 10), &cal());
        assert_eq!(eval.outcome, StreakOutcome::ResetMultiDay);
        assert_eq!(eval.state.current_streak, 1);
        assert_eq!(eval.state.longest_streak, 12);
    }

    #[test]
    fn clock_skew_is_treated_as_same_day() {
        let state = state_at(2, 2, at(6, 10));
        let eval = evaluate(&state, &StreakActivity::Workout, at(5, 10), &cal());
        assert_eq!(eval.outcome, StreakOutcome::SameDay);
        assert_eq!(eval.state.current_streak, 2);
    }

    #[test]
    fn evaluation_clears_grace_flag() {
        let state = StreakState {
            in_grace_period: true,
            ..state_at(2, 2, at(6, 10))
        };
        let eval = evaluate(&state, &StreakActivity::Workout, at(7, 10), &cal());
        assert!(!eval.state.in_grace_period);
    }

    #[test]
    fn decayed_streak_restarts_at_one() {
        let state = StreakState {
            grace_period_hours: 72,
            ..state_at(0, 4, at(3, 12))
        };
        let eval = evaluate(&state, &StreakActivity::Workout, at(5, 9), &cal());
        assert_eq!(eval.outcome, StreakOutcome::GraceMaintained);
        assert_eq!(eval.state.current_streak, 1);
        assert_eq!(eval.state.longest_streak, 4);
    }

    #[test]
    fn longest_never_below_current_over_a_long_run() {
        let mut state = StreakState::default();
        let mut now = at(1, 7);
        for i in 0..40 {
            // Every seventh step skips three days.
            now += if i % 7 == 6 {
                Duration::days(4)
            } else {
                Duration::days(1)
            };
            let eval = evaluate(&state, &StreakActivity::Workout, now, &cal());
            assert!(eval.state.longest_streak >= eval.state.current_streak);
            assert!(eval.state.current_streak >= 1);
            assert!(eval.state.longest_streak >= state.longest_streak);
            state = eval.state;
        }
    }

    #[test]
    fn outcome_flags_match_streak_changes() {
        assert!(StreakOutcome::Started.changed_streak());
        assert!(StreakOutcome::ResetMultiDay.changed_streak());
        assert!(!StreakOutcome::SameDay.changed_streak());
        assert!(!StreakOutcome::GraceMaintained.changed_streak());
        assert!(!StreakOutcome::NotQualifying.changed_streak());
    }

    // -----------------------------------------------------------------------
    // Assessment
    // -----------------------------------------------------------------------

    #[test]
    fn assess_without_activity_is_inactive() {
        let a = assess(&StreakState::default(), at(1, 9), &cal());
        assert_eq!(a.status, StreakStatus::Inactive);
        assert!(!a.changed);
    }

    #[test]
    fn assess_yesterday_is_pending_and_flags_grace() {
        let a = assess(&state_at(3, 3, at(1, 22)), at(2, 9), &cal());
        assert_eq!(a.status, StreakStatus::Pending);
        assert!(a.state.in_grace_period);
        assert_eq!(a.state.current_streak, 3);
        assert!(a.changed);
    }

    #[test]
    fn assess_today_clears_grace_flag() {
        let state = StreakState {
            in_grace_period: true,
            ..state_at(3, 3, at(2, 8))
        };
        let a = assess(&state, at(2, 9), &cal());
        assert_eq!(a.status, StreakStatus::ActiveToday);
        assert!(!a.state.in_grace_period);
    }

    #[test]
    fn assess_skipped_day_inside_window_flags_grace() {
        let state = StreakState {
            grace_period_hours: 48,
            ..state_at(3, 3, at(1, 22))
        };
        let a = assess(&state, at(3, 9), &cal());
        assert_eq!(a.status, StreakStatus::InGrace);
        assert!(a.state.in_grace_period);
        assert!(a.changed);
    }

    #[test]
    fn assess_broken_streak_decays_to_zero() {
        let a = assess(&state_at(6, 9, at(1, 9)), at(5, 9), &cal());
        assert_eq!(a.status, StreakStatus::Broken);
        assert_eq!(a.state.current_streak, 0);
        assert_eq!(a.state.longest_streak, 9);
        assert!(a.changed);
    }

    #[test]
    fn assess_is_idempotent_once_broken() {
        let first = assess(&state_at(6, 9, at(1, 9)), at(5, 9), &cal());
        let second = assess(&first.state, at(5, 10), &cal());
        assert!(!second.changed);
    }
}
