//! Pure streak arithmetic over calendar days.
//!
//! Nothing here touches storage or the wall clock; every function takes the
//! evaluation date explicitly.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use super::types::StreakState;

/// Count consecutive active days ending at `today`, looking back at most
/// `lookback_days` days.
///
/// Returns 0 when `today` itself is not in `dates`: a streak is only live once
/// today's activity has been logged.
pub fn compute_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate, lookback_days: u32) -> u32 {
    (0..u64::from(lookback_days))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .take_while(|day| dates.contains(day))
        .count() as u32
}

fn is_next_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}

impl StreakState {
    /// The state after an activity on `today`, assuming `today` was not yet an
    /// active day in the store.
    ///
    /// Returns a new value; `self` is left untouched.
    pub fn advance(&self, today: NaiveDate) -> StreakState {
        let mut next = self.clone();

        match self.last_activity_date {
            Some(last) if last == today => return next,
            // Backdated activity: the day counts, the running streak does not move.
            Some(last) if last > today => {
                next.total_active_days = next.total_active_days.saturating_add(1);
                return next;
            }
            Some(last) if is_next_day(last, today) && self.current_streak > 0 => {
                next.current_streak = self.current_streak.saturating_add(1);
            }
            _ => {
                next.current_streak = 1;
                next.streak_start_date = Some(today);
            }
        }

        next.longest_streak = next.longest_streak.max(next.current_streak);
        next.total_active_days = next.total_active_days.saturating_add(1);
        next.last_activity_date = Some(today);
        next
    }

    /// The state as seen on `date`: the current streak reads 0 once the last
    /// active day is older than yesterday.
    pub fn as_of(&self, date: NaiveDate) -> StreakState {
        match self.last_activity_date {
            Some(last) if last >= date || is_next_day(last, date) => self.clone(),
            _ => StreakState {
                current_streak: 0,
                streak_start_date: None,
                ..self.clone()
            },
        }
    }

    /// Derive the full state from raw activity days, ignoring days after
    /// `today`.
    pub fn from_history(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> StreakState {
        let mut longest = 0u32;
        let mut run = 0u32;
        let mut run_start: Option<NaiveDate> = None;
        let mut prev: Option<NaiveDate> = None;
        let mut total = 0u32;

        for &day in dates.range(..=today) {
            match prev {
                Some(p) if is_next_day(p, day) => run += 1,
                _ => {
                    run = 1;
                    run_start = Some(day);
                }
            }
            longest = longest.max(run);
            total += 1;
            prev = Some(day);
        }

        let state = StreakState {
            current_streak: run,
            longest_streak: longest,
            streak_start_date: run_start,
            last_activity_date: prev,
            total_active_days: total,
        };
        state.as_of(today)
    }
}
