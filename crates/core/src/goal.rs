//! Fitness goals: milestones, progress percentage, on-track check, and the
//! status lifecycle (`IN_PROGRESS` -> `COMPLETED` | `ABANDONED`).
//!
//! A goal moves from `start_value` towards `target_value` in one direction.
//! Decreasing goals (weight loss) progress as the value drops, increasing
//! goals as it rises. Milestones are the four quarter points between start
//! and target and, once achieved, stay achieved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of milestones generated per goal.
pub const MILESTONE_COUNT: usize = 4;

/// Reward text used when no per-type reward exists.
pub const FALLBACK_REWARD: &str = "Keep going!";

/// Quote used when no per-type quote exists.
pub const FALLBACK_QUOTE: &str = "Your journey to better health starts here!";

/// Prefix of the note appended when a goal is abandoned with a reason.
pub const ABANDON_NOTE_PREFIX: &str = "Goal abandoned: ";

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 3600.0;

// ---------------------------------------------------------------------------
// Goal type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    LoseWeight,
    GainWeight,
    BuildStrength,
    BuildStamina,
    MaintainWeight,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        Self::LoseWeight,
        Self::GainWeight,
        Self::BuildStrength,
        Self::BuildStamina,
        Self::MaintainWeight,
    ];

    /// Canonical storage name, e.g. `LOSE_WEIGHT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoseWeight => "LOSE_WEIGHT",
            Self::GainWeight => "GAIN_WEIGHT",
            Self::BuildStrength => "BUILD_STRENGTH",
            Self::BuildStamina => "BUILD_STAMINA",
            Self::MaintainWeight => "MAINTAIN_WEIGHT",
        }
    }

    /// Human-readable label, e.g. `Lose Weight`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose Weight",
            Self::GainWeight => "Gain Weight",
            Self::BuildStrength => "Build Strength",
            Self::BuildStamina => "Build Stamina",
            Self::MaintainWeight => "Maintain Weight",
        }
    }

    /// Map the metric names used by the mobile/web clients onto a goal type.
    fn from_client_alias(s: &str) -> Option<Self> {
        match s {
            "Weight Loss" => Some(Self::LoseWeight),
            "Weight Gain" => Some(Self::GainWeight),
            "Steps" => Some(Self::BuildStamina),
            "Water Intake" => Some(Self::MaintainWeight),
            "Exercise Minutes" => Some(Self::BuildStrength),
            "Sleep Hours" => Some(Self::MaintainWeight),
            _ => None,
        }
    }

    /// Reward text for milestone number `index` (1-based).
    pub fn milestone_reward(&self, index: usize) -> &'static str {
        let rewards: [&'static str; MILESTONE_COUNT] = match self {
            Self::LoseWeight => [
                "First step towards a healthier you!",
                "You're making great progress!",
                "Almost there, keep pushing!",
                "You're unstoppable!",
            ],
            Self::GainWeight => [
                "Building foundations!",
                "Growing stronger!",
                "Impressive gains!",
                "Peak performance achieved!",
            ],
            Self::BuildStrength => [
                "Foundation of strength laid!",
                "Power level increasing!",
                "Strength gains unlocked!",
                "Ultimate strength achieved!",
            ],
            Self::BuildStamina => [
                "Endurance journey begun!",
                "Stamina increasing!",
                "Energy levels maxing!",
                "Peak endurance reached!",
            ],
            Self::MaintainWeight => [
                "Consistency is key!",
                "Balance maintained!",
                "Healthy habits formed!",
                "Lifestyle mastered!",
            ],
        };
        index
            .checked_sub(1)
            .and_then(|i| rewards.get(i).copied())
            .unwrap_or(FALLBACK_REWARD)
    }

    /// Default motivational quote for this goal type.
    pub fn motivational_quote(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Every step forward is a step towards your goal. You've got this!",
            Self::GainWeight => "Building strength takes time. Trust the process!",
            Self::BuildStrength => "Your only limit is you. Push through it!",
            Self::BuildStamina => "Energy and persistence conquer all things!",
            Self::MaintainWeight => "Balance is not something you find, it's something you create.",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = CoreError;

    /// Accepts canonical names, display labels and client aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == trimmed || t.label() == trimmed)
            .or_else(|| Self::from_client_alias(trimmed))
            .ok_or_else(|| CoreError::Validation(format!("Unknown goal type: '{trimmed}'")))
    }
}

/// Milestone reward for a raw type label. Unknown labels get the fallback.
pub fn milestone_reward(type_label: &str, index: usize) -> &'static str {
    type_label
        .parse::<GoalType>()
        .map(|t| t.milestone_reward(index))
        .unwrap_or(FALLBACK_REWARD)
}

/// Motivational quote for a raw type label. Unknown labels get the fallback.
pub fn motivational_quote(type_label: &str) -> &'static str {
    type_label
        .parse::<GoalType>()
        .map(|t| t.motivational_quote())
        .unwrap_or(FALLBACK_QUOTE)
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Abandoned => "ABANDONED",
        }
    }

    /// Completed and abandoned goals accept no further progress.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "IN_PROGRESS" | "In Progress" => Ok(Self::InProgress),
            "COMPLETED" | "Completed" => Ok(Self::Completed),
            "ABANDONED" | "Abandoned" => Ok(Self::Abandoned),
            other => Err(CoreError::Validation(format!("Unknown goal status: '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Embedded records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub value: f64,
    pub achieved: bool,
    pub achieved_date: Option<Timestamp>,
    pub reward: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub week: i64,
    pub value: f64,
    pub date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalNote {
    pub date: Timestamp,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub enabled: bool,
    pub frequency: ReminderFrequency,
    pub time: String,
}

impl Default for Reminder {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: ReminderFrequency::Daily,
            time: "09:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivation {
    pub quote: String,
    pub reminder: Reminder,
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// Direction a goal's value has to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
    Flat,
}

impl Direction {
    pub fn of(start: f64, target: f64) -> Self {
        if target > start {
            Self::Increasing
        } else if target < start {
            Self::Decreasing
        } else {
            Self::Flat
        }
    }

    /// Whether `value` has reached `threshold` moving in this direction.
    fn reached(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Increasing => value >= threshold,
            Self::Decreasing => value <= threshold,
            Self::Flat => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_type: GoalType,
    pub status: GoalStatus,
    pub start_date: Timestamp,
    pub target_date: Timestamp,
    pub start_value: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub milestones: Vec<Milestone>,
    pub weekly_progress: Vec<WeeklyProgress>,
    pub notes: Vec<GoalNote>,
    pub motivation: Motivation,
}

/// Client input for a new goal.
#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub goal_type: GoalType,
    pub target_date: Timestamp,
    pub start_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub quote: Option<String>,
    pub reminder: Option<Reminder>,
}

impl Goal {
    /// Build a new in-progress goal starting at `now`.
    pub fn create(draft: GoalDraft, now: Timestamp) -> Result<Self, CoreError> {
        if !draft.start_value.is_finite() || !draft.target_value.is_finite() {
            return Err(CoreError::Validation(
                "Start and target values must be finite numbers".to_string(),
            ));
        }
        if draft.start_value == draft.target_value {
            return Err(CoreError::Validation(
                "Target value must differ from start value".to_string(),
            ));
        }
        if draft.target_date <= now {
            return Err(CoreError::Validation(
                "Target date must be in the future".to_string(),
            ));
        }
        let unit = draft.unit.trim();
        if unit.is_empty() {
            return Err(CoreError::Validation("Unit is required".to_string()));
        }

        let quote = draft
            .quote
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| draft.goal_type.motivational_quote().to_string());

        Ok(Self {
            goal_type: draft.goal_type,
            status: GoalStatus::InProgress,
            start_date: now,
            target_date: draft.target_date,
            start_value: draft.start_value,
            current_value: draft.start_value,
            target_value: draft.target_value,
            unit: unit.to_string(),
            milestones: generate_milestones(draft.goal_type, draft.start_value, draft.target_value),
            weekly_progress: Vec::new(),
            notes: Vec::new(),
            motivation: Motivation {
                quote,
                reminder: draft.reminder.unwrap_or_default(),
            },
        })
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.start_value, self.target_value)
    }
}

/// Four evenly spaced milestones from `start` towards `target`, the last one
/// sitting on the target itself.
pub fn generate_milestones(goal_type: GoalType, start: f64, target: f64) -> Vec<Milestone> {
    let total = target - start;
    (1..=MILESTONE_COUNT)
        .map(|i| Milestone {
            value: start + total * (i as f64 / MILESTONE_COUNT as f64),
            achieved: false,
            achieved_date: None,
            reward: goal_type.milestone_reward(i).to_string(),
        })
        .collect()
}

/// Progress towards the target as a percentage in `[0, 100]`.
pub fn progress_percent(goal: &Goal) -> f64 {
    let total = goal.target_value - goal.start_value;
    let pct = match goal.direction() {
        Direction::Decreasing => {
            if goal.current_value <= goal.target_value {
                return 100.0;
            }
            let remaining = goal.current_value - goal.target_value;
            let total_abs = total.abs();
            (total_abs - remaining) / total_abs * 100.0
        }
        Direction::Increasing => {
            if goal.current_value >= goal.target_value {
                return 100.0;
            }
            (goal.current_value - goal.start_value) / total * 100.0
        }
        Direction::Flat => {
            if goal.current_value >= goal.target_value {
                return 100.0;
            }
            0.0
        }
    };
    if pct.is_nan() {
        0.0
    } else {
        pct.clamp(0.0, 100.0)
    }
}

/// Whether actual progress keeps pace with the elapsed share of the goal's
/// calendar-day span.
pub fn is_on_track(goal: &Goal, now: Timestamp, calendar: &Calendar) -> Result<bool, CoreError> {
    let total_days = calendar.days_between(goal.start_date, goal.target_date);
    if total_days == 0 {
        return Err(CoreError::Validation(
            "Goal starts and ends on the same day".to_string(),
        ));
    }
    let days_elapsed = calendar.days_between(goal.start_date, now);
    let expected = days_elapsed as f64 / total_days as f64 * 100.0;
    Ok(progress_percent(goal) >= expected)
}

/// Week number of `now` relative to the goal start (`ceil(elapsed / 7d)`).
pub fn week_number(start: Timestamp, now: Timestamp) -> i64 {
    let elapsed = (now - start).num_seconds() as f64;
    (elapsed / SECONDS_PER_WEEK).ceil() as i64
}

/// A milestone newly achieved by a progress update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneEvent {
    /// 1-based milestone number.
    pub index: usize,
    pub value: f64,
    pub reward: String,
}

/// Effects of [`apply_progress_update`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProgressUpdate {
    pub milestones_achieved: Vec<MilestoneEvent>,
    pub completed: bool,
}

/// Record a new current value on an in-progress goal.
pub fn apply_progress_update(
    goal: &mut Goal,
    value: f64,
    note: Option<&str>,
    now: Timestamp,
) -> Result<ProgressUpdate, CoreError> {
    if goal.status.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Goal is {} and no longer accepts progress",
            goal.status
        )));
    }
    if !value.is_finite() {
        return Err(CoreError::Validation(
            "Current value must be a finite number".to_string(),
        ));
    }

    goal.current_value = value;
    goal.weekly_progress.push(WeeklyProgress {
        week: week_number(goal.start_date, now),
        value,
        date: now,
    });

    let direction = goal.direction();
    let mut update = ProgressUpdate::default();
    for (i, milestone) in goal.milestones.iter_mut().enumerate() {
        if !milestone.achieved && direction.reached(value, milestone.value) {
            milestone.achieved = true;
            milestone.achieved_date = Some(now);
            update.milestones_achieved.push(MilestoneEvent {
                index: i + 1,
                value: milestone.value,
                reward: milestone.reward.clone(),
            });
        }
    }

    if direction.reached(value, goal.target_value) {
        goal.status = GoalStatus::Completed;
        update.completed = true;
    }

    if let Some(content) = note.map(str::trim).filter(|c| !c.is_empty()) {
        goal.notes.push(GoalNote {
            date: now,
            content: content.to_string(),
        });
    }

    Ok(update)
}

/// Abandon an in-progress goal, optionally recording why.
pub fn abandon(goal: &mut Goal, reason: Option<&str>, now: Timestamp) -> Result<(), CoreError> {
    if goal.status.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Goal is already {}",
            goal.status
        )));
    }
    goal.status = GoalStatus::Abandoned;
    if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
        goal.notes.push(GoalNote {
            date: now,
            content: format!("{ABANDON_NOTE_PREFIX}{reason}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
