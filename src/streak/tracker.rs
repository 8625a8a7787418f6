use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use super::compute::compute_streak;
use super::store::ActivityStore;
use super::types::{ActivityKind, StreakState};
use super::DEFAULT_LOOKBACK_DAYS;
use crate::error::StoreError;

/// Per-user consecutive-day activity tracking over an [`ActivityStore`].
///
/// The tracker holds no state of its own; every call reads fresh from the
/// store.
#[derive(Debug, Clone)]
pub struct StreakTracker<S> {
    store: S,
    lookback_days: u32,
}

impl<S: ActivityStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mark `today` as active for `user_id` (as a login) and return the
    /// updated streak state. Repeat calls on the same day change nothing.
    pub fn record_activity(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        self.record(user_id, today, ActivityKind::Login)
    }

    /// Mark `today` as active because of `kind`.
    pub fn record(
        &self,
        user_id: &str,
        today: NaiveDate,
        kind: ActivityKind,
    ) -> Result<StreakState, StoreError> {
        let commit = self
            .store
            .commit_activity_day(user_id, today, kind)
            .inspect_err(|e| {
                warn!(user_id, %today, %kind, error = %e, "failed to record activity");
            })?;

        if commit.write.is_new_day() {
            let (previous, state) = (&commit.previous, &commit.state);
            if state.streak_start_date == Some(today) && previous.current_streak > 0 {
                info!(user_id, %today, previous = previous.current_streak, "streak reset");
            }
            info!(
                user_id,
                %today,
                %kind,
                current = state.current_streak,
                longest = state.longest_streak,
                total = state.total_active_days,
                "activity day recorded"
            );
        } else {
            debug!(user_id, %today, %kind, write = ?commit.write, "day already active");
        }
        Ok(commit.state)
    }

    /// Stored state as seen on `today` (current streak is 0 once stale).
    pub fn streak_state(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        Ok(self
            .store
            .latest_streak_state(user_id)?
            .unwrap_or_default()
            .as_of(today))
    }

    /// Consecutive active days of any kind ending today, from raw history.
    pub fn activity_streak(&self, user_id: &str, today: NaiveDate) -> Result<u32, StoreError> {
        self.streak_from_history(user_id, None, today)
    }

    /// Consecutive days with at least one `kind` activity ending today.
    pub fn kind_streak(
        &self,
        user_id: &str,
        kind: ActivityKind,
        today: NaiveDate,
    ) -> Result<u32, StoreError> {
        self.streak_from_history(user_id, Some(kind), today)
    }

    pub fn mood_streak(&self, user_id: &str, today: NaiveDate) -> Result<u32, StoreError> {
        self.kind_streak(user_id, ActivityKind::MoodEntry, today)
    }

    /// Recompute the stored state from every recorded activity day and
    /// overwrite it.
    pub fn rebuild(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        let dates = self
            .store
            .list_activity_dates(user_id, NaiveDate::MIN, None)?;
        let state = StreakState::from_history(&dates, today);
        self.store.replace_streak_state(user_id, &state)?;

        info!(
            user_id,
            days = dates.len(),
            current = state.current_streak,
            longest = state.longest_streak,
            "streak rebuilt from history"
        );
        Ok(state)
    }

    fn streak_from_history(
        &self,
        user_id: &str,
        kind: Option<ActivityKind>,
        today: NaiveDate,
    ) -> Result<u32, StoreError> {
        if self.lookback_days == 0 {
            return Ok(0);
        }
        let since = today
            .checked_sub_days(Days::new(u64::from(self.lookback_days - 1)))
            .unwrap_or(NaiveDate::MIN);
        let dates = self.store.list_activity_dates(user_id, since, kind)?;
        Ok(compute_streak(&dates, today, self.lookback_days))
    }
}
