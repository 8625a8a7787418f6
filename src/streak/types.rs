//! Streak type definitions.
//!
//! Defines [`ActivityKind`] (what produced an active day), [`StreakState`]
//! (the per-user streak record), and [`DayWrite`] (outcome of persisting an
//! activity for a day).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The user action that marked a day as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// App opened by a signed-in user.
    Login,
    /// A mood check-in.
    MoodEntry,
    JournalEntry,
    /// Progress recorded against an enrolled course.
    CourseProgress,
    HealthLog,
    FinanceUpdate,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        Self::Login,
        Self::MoodEntry,
        Self::JournalEntry,
        Self::CourseProgress,
        Self::HealthLog,
        Self::FinanceUpdate,
    ];

    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::MoodEntry => "mood_entry",
            Self::JournalEntry => "journal_entry",
            Self::CourseProgress => "course_progress",
            Self::HealthLog => "health_log",
            Self::FinanceUpdate => "finance_update",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown activity kind: {s}"))
    }
}

/// Consecutive-day activity statistics for one user, matching the
/// `user_streaks` table.
///
/// A fresh user has the [`Default`] state: all counts zero, no dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    /// Length of the run of active days ending at `last_activity_date`.
    pub current_streak: u32,
    /// Longest run ever observed. Never less than `current_streak`.
    pub longest_streak: u32,
    /// First day of the current run, `None` while no run is active.
    pub streak_start_date: Option<NaiveDate>,
    pub last_activity_date: Option<NaiveDate>,
    /// Distinct calendar days with at least one recorded activity.
    pub total_active_days: u32,
}

/// What persisting an activity did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayWrite {
    /// First activity of any kind for this user on this day.
    NewDay,
    /// The day was already active; this kind was not yet recorded for it.
    NewKind,
    /// The exact (user, day, kind) record already existed.
    Duplicate,
}

impl DayWrite {
    pub fn is_new_day(&self) -> bool {
        matches!(self, Self::NewDay)
    }
}

/// Outcome of [`super::ActivityStore::commit_activity_day`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCommit {
    pub write: DayWrite,
    /// Stored state read inside the write transaction, before the activity.
    pub previous: StreakState,
    /// Stored state after the commit; equal to `previous` unless `write` is
    /// [`DayWrite::NewDay`].
    pub state: StreakState,
}
