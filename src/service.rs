//! Async facade over the streak store and the allocation advisor.
//!
//! [`LifeOs`] owns one SQLite connection behind a mutex. Storage work runs on
//! the blocking pool and is bounded by `storage.call_timeout_ms`; a call that
//! times out is reported as [`StoreError::Timeout`] but may still commit in the
//! background.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::allocation::{AllocationAdvisor, AllocationPlan};
use crate::config::LifeOsConfig;
use crate::db::{self, HealthReport};
use crate::error::StoreError;
use crate::streak::{ActivityKind, StreakState, StreakTracker};

#[derive(Clone)]
pub struct LifeOs {
    db: Arc<Mutex<Connection>>,
    config: Arc<LifeOsConfig>,
    advisor: AllocationAdvisor,
}

impl LifeOs {
    /// Open the configured database (creating and migrating it if needed).
    pub fn open(config: LifeOsConfig) -> Result<Self> {
        let db_path = config.resolved_db_path();
        let conn = db::open_database_with(&db_path, config.storage.busy_timeout())
            .with_context(|| format!("failed to open LifeOS database at {}", db_path.display()))?;
        tracing::info!(db = %db_path.display(), "LifeOS store ready");
        Ok(Self::from_connection(conn, config))
    }

    /// Wrap an already-initialized connection.
    pub fn from_connection(conn: Connection, config: LifeOsConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            config: Arc::new(config),
            advisor: AllocationAdvisor::default(),
        }
    }

    pub fn config(&self) -> &LifeOsConfig {
        &self.config
    }

    /// Record a login for `today`.
    pub async fn record_activity(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        self.record(user_id, today, ActivityKind::Login).await
    }

    pub async fn record(
        &self,
        user_id: &str,
        today: NaiveDate,
        kind: ActivityKind,
    ) -> Result<StreakState, StoreError> {
        let user_id = user_id.to_string();
        self.with_tracker(move |tracker| tracker.record(&user_id, today, kind))
            .await
    }

    pub async fn streak_state(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        let user_id = user_id.to_string();
        self.with_tracker(move |tracker| tracker.streak_state(&user_id, today))
            .await
    }

    pub async fn activity_streak(&self, user_id: &str, today: NaiveDate) -> Result<u32, StoreError> {
        let user_id = user_id.to_string();
        self.with_tracker(move |tracker| tracker.activity_streak(&user_id, today))
            .await
    }

    pub async fn mood_streak(&self, user_id: &str, today: NaiveDate) -> Result<u32, StoreError> {
        let user_id = user_id.to_string();
        self.with_tracker(move |tracker| tracker.mood_streak(&user_id, today))
            .await
    }

    pub async fn rebuild_streak(&self, user_id: &str, today: NaiveDate) -> Result<StreakState, StoreError> {
        let user_id = user_id.to_string();
        self.with_tracker(move |tracker| tracker.rebuild(&user_id, today))
            .await
    }

    /// Pure; does not touch the store.
    pub fn suggest_allocations(&self, request_text: &str, total_amount: f64) -> AllocationPlan {
        self.advisor.suggest(request_text, total_amount)
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| anyhow::anyhow!("db lock poisoned: {e}"))?;
            db::check_database_health(&conn)
        })
        .await
        .context("health check task failed")?
    }

    async fn with_tracker<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&StreakTracker<&Connection>) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let lookback = self.config.streak.lookback_days;
        let timeout = self.config.storage.call_timeout();

        let task = tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            let tracker = StreakTracker::new(&*conn).with_lookback(lookback);
            op(&tracker)
        });

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(StoreError::Task(join_err.to_string())),
            Err(_) => {
                tracing::warn!(?timeout, "storage call timed out");
                Err(StoreError::Timeout(timeout))
            }
        }
    }
}
