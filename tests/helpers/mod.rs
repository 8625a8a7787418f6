#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use chrono::NaiveDate;
use lifeos::db;
use lifeos::error::StoreError;
use lifeos::streak::{ActivityKind, ActivityStore, DayCommit, DayWrite, StreakState};
use rusqlite::Connection;

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Day `offset` counted from 2024-01-01 (offset 0).
pub fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

/// Build a date set from day offsets.
pub fn days(offsets: &[u32]) -> BTreeSet<NaiveDate> {
    offsets.iter().map(|&o| day(o)).collect()
}

/// Wraps a real store and fails every `commit_activity_day` while `fail_commits` is set.
pub struct FlakyStore<'a> {
    pub inner: &'a Connection,
    pub fail_commits: Cell<bool>,
}

impl<'a> FlakyStore<'a> {
    pub fn new(inner: &'a Connection) -> Self {
        Self {
            inner,
            fail_commits: Cell::new(false),
        }
    }
}

impl ActivityStore for FlakyStore<'_> {
    fn latest_streak_state(&self, user_id: &str) -> Result<Option<StreakState>, StoreError> {
        self.inner.latest_streak_state(user_id)
    }

    fn upsert_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayWrite, StoreError> {
        self.inner.upsert_activity_day(user_id, date, kind)
    }

    fn commit_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayCommit, StoreError> {
        if self.fail_commits.get() {
            return Err(StoreError::Task("simulated network failure".into()));
        }
        self.inner.commit_activity_day(user_id, date, kind)
    }

    fn replace_streak_state(&self, user_id: &str, state: &StreakState) -> Result<(), StoreError> {
        self.inner.replace_streak_state(user_id, state)
    }

    fn list_activity_dates(
        &self,
        user_id: &str,
        since: NaiveDate,
        kind: Option<ActivityKind>,
    ) -> Result<BTreeSet<NaiveDate>, StoreError> {
        self.inner.list_activity_dates(user_id, since, kind)
    }
}

/// Wraps a real store and runs `before_commit` once, just before the first
/// `commit_activity_day` reaches the inner store. Used to let another session
/// write between a caller's reads and its commit.
pub struct InterleavedStore<'a> {
    pub inner: &'a Connection,
    before_commit: RefCell<Option<Box<dyn FnOnce() + 'a>>>,
}

impl<'a> InterleavedStore<'a> {
    pub fn new(inner: &'a Connection, before_commit: impl FnOnce() + 'a) -> Self {
        Self {
            inner,
            before_commit: RefCell::new(Some(Box::new(before_commit))),
        }
    }

    fn run_hook(&self) {
        if let Some(hook) = self.before_commit.borrow_mut().take() {
            hook();
        }
    }
}

impl ActivityStore for InterleavedStore<'_> {
    fn latest_streak_state(&self, user_id: &str) -> Result<Option<StreakState>, StoreError> {
        let state = self.inner.latest_streak_state(user_id);
        self.run_hook();
        state
    }

    fn upsert_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayWrite, StoreError> {
        self.inner.upsert_activity_day(user_id, date, kind)
    }

    fn commit_activity_day(
        &self,
        user_id: &str,
        date: NaiveDate,
        kind: ActivityKind,
    ) -> Result<DayCommit, StoreError> {
        self.run_hook();
        self.inner.commit_activity_day(user_id, date, kind)
    }

    fn replace_streak_state(&self, user_id: &str, state: &StreakState) -> Result<(), StoreError> {
        self.inner.replace_streak_state(user_id, state)
    }

    fn list_activity_dates(
        &self,
        user_id: &str,
        since: NaiveDate,
        kind: Option<ActivityKind>,
    ) -> Result<BTreeSet<NaiveDate>, StoreError> {
        self.inner.list_activity_dates(user_id, since, kind)
    }
}
