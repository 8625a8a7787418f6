//! Persistence seam for activity days and streak state.
//!
//! [`ActivityStore`] is what [`super::StreakTracker`] needs from storage. The
//! SQLite implementation lives directly on [`rusqlite::Connection`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use super::types::{ActivityKind, DayCommit, DayWrite, StreakState};
use crate::error::StoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage operations behind the streak tracker.
///
/// Writes must be idempotent per `(user, date, kind)` at the storage layer so
/// that concurrent sessions recording the same day never inflate totals.
pub trait ActivityStore {
    /// Latest stored streak state, `None` for a user with no activity.
    fn latest_streak_state(&self, user_id: &str) -> Result<Option<StreakState>, StoreError>;

    /// Record an activity for a day without touching the streak state.
    fn upsert_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayWrite, StoreError>;

    /// Atomically record an activity and, if it opened a new active day,
    /// advance the stored streak state to `date`. The state is read and
    /// written inside the same transaction. Nothing is written on error.
    fn commit_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayCommit, StoreError>;

    /// Overwrite the stored streak state.
    fn replace_streak_state(&self, user_id: &str, state: &StreakState) -> Result<(), StoreError>;

    /// Distinct active days on or after `since`, optionally limited to one kind.
    fn list_activity_dates(
        &self,
        user_id: &str,
        since: NaiveDate,
        kind: Option<ActivityKind>,
    ) -> Result<BTreeSet<NaiveDate>, StoreError>;
}

impl<S: ActivityStore + ?Sized> ActivityStore for &S {
    fn latest_streak_state(&self, user_id: &str) -> Result<Option<StreakState>, StoreError> {
        (**self).latest_streak_state(user_id)
    }

    fn upsert_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayWrite, StoreError> {
        (**self).upsert_activity_day(user_id, date, kind)
    }

    fn commit_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayCommit, StoreError> {
        (**self).commit_activity_day(user_id, date, kind)
    }

    fn replace_streak_state(&self, user_id: &str, state: &StreakState) -> Result<(), StoreError> {
        (**self).replace_streak_state(user_id, state)
    }

    fn list_activity_dates(
        &self,
        user_id: &str,
        since: NaiveDate,
        kind: Option<ActivityKind>,
    ) -> Result<BTreeSet<NaiveDate>, StoreError> {
        (**self).list_activity_dates(user_id, since, kind)
    }
}

impl ActivityStore for Connection {
    fn latest_streak_state(&self, user_id: &str) -> Result<Option<StreakState>, StoreError> {
        read_streak_state(self, user_id)
    }

    fn upsert_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayWrite, StoreError> {
        let tx = Transaction::new_unchecked(self, TransactionBehavior::Immediate)?;
        let write = insert_activity(&tx, user_id, date, kind)?;
        tx.commit()?;
        Ok(write)
    }

    fn commit_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayCommit, StoreError> {
        // IMMEDIATE takes the write lock before the read, so no other session
        // can change the state between reading and advancing it.
        let tx = Transaction::new_unchecked(self, TransactionBehavior::Immediate)?;
        let previous = read_streak_state(&tx, user_id)?.unwrap_or_default();
        let write = insert_activity(&tx, user_id, date, kind)?;
        let state = if write.is_new_day() {
            let next = previous.advance(date);
            write_streak_state(&tx, user_id, &next)?;
            next
        } else {
            previous.clone()
        };
        tx.commit()?;

        Ok(DayCommit {
            write,
            previous,
            state,
        })
    }

    fn replace_streak_state(&self, user_id: &str, state: &StreakState) -> Result<(), StoreError> {
        write_streak_state(self, user_id, state)
    }

    fn list_activity_dates(
        &self,
        user_id: &str,
        since: NaiveDate,
        kind: Option<ActivityKind>,
    ) -> Result<BTreeSet<NaiveDate>, StoreError> {
        let since = format_date(since);
        let raw: Vec<String> = match kind {
            Some(kind) => self
                .prepare(
                    "SELECT DISTINCT activity_date FROM activity_records \
                     WHERE user_id = ?1 AND activity_date >= ?2 AND activity_kind = ?3",
                )?
                .query_map(params![user_id, since, kind.as_str()], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?,
            None => self
                .prepare(
                    "SELECT DISTINCT activity_date FROM activity_records \
                     WHERE user_id = ?1 AND activity_date >= ?2",
                )?
                .query_map(params![user_id, since], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?,
        };

        raw.iter().map(|s| parse_date("activity_date", s)).collect()
    }
}

fn read_streak_state(conn: &Connection, user_id: &str) -> Result<Option<StreakState>, StoreError> {
    let row: Option<(i64, i64, Option<String>, Option<String>, i64)> = conn
        .query_row(
            "SELECT current_streak, longest_streak, streak_start_date, last_activity_date, total_active_days \
             FROM user_streaks WHERE user_id = ?1",
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .optional()?;

    let Some((current, longest, start, last, total)) = row else {
        return Ok(None);
    };

    Ok(Some(StreakState {
        current_streak: count_from_sql("current_streak", current)?,
        longest_streak: count_from_sql("longest_streak", longest)?,
        streak_start_date: start.map(|s| parse_date("streak_start_date", &s)).transpose()?,
        last_activity_date: last.map(|s| parse_date("last_activity_date", &s)).transpose()?,
        total_active_days: count_from_sql("total_active_days", total)?,
    }))
}

/// Insert the (user, date, kind) record if absent and classify the write.
fn insert_activity(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
    kind: ActivityKind,
) -> Result<DayWrite, StoreError> {
    let date = format_date(date);

    let day_known: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM activity_records WHERE user_id = ?1 AND activity_date = ?2)",
        params![user_id, date],
        |row| row.get(0),
    )?;

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO activity_records (id, user_id, activity_date, activity_kind, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            uuid::Uuid::now_v7().to_string(),
            user_id,
            date,
            kind.as_str(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(match (inserted, day_known) {
        (0, _) => DayWrite::Duplicate,
        (_, true) => DayWrite::NewKind,
        (_, false) => DayWrite::NewDay,
    })
}

fn write_streak_state(conn: &Connection, user_id: &str, state: &StreakState) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO user_streaks \
             (user_id, current_streak, longest_streak, streak_start_date, last_activity_date, total_active_days, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
         ON CONFLICT(user_id) DO UPDATE SET \
             current_streak = excluded.current_streak, \
             longest_streak = excluded.longest_streak, \
             streak_start_date = excluded.streak_start_date, \
             last_activity_date = excluded.last_activity_date, \
             total_active_days = excluded.total_active_days, \
             updated_at = excluded.updated_at",
        params![
            user_id,
            state.current_streak,
            state.longest_streak,
            state.streak_start_date.map(format_date),
            state.last_activity_date.map(format_date),
            state.total_active_days,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(column: &'static str, value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| StoreError::Corrupt {
        column,
        value: value.to_string(),
    })
}

fn count_from_sql(column: &'static str, value: i64) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::Corrupt {
        column,
        value: value.to_string(),
    })
}
