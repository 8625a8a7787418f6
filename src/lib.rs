//! LifeOS core: consecutive-day activity streaks and rule-based budget allocation.
//!
//! Two independent components carry the logic behind the LifeOS dashboard:
//!
//! | Component | Input | Output |
//! |-----------|-------|--------|
//! | **Streak tracker** | dated activity (login, mood entry, course progress, ...) | current / longest streak, total active days |
//! | **Allocation advisor** | free-text budget request + paycheck amount | categorized allocations with percentages and advice |
//!
//! The tracker persists one record per user, day, and activity kind, plus a
//! materialized streak row per user. The advisor is a pure function.
//!
//! # Modules
//!
//! - [`allocation`]: category table, request parsing, allocation plans
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization, schema, and health checks
//! - [`error`]: Typed storage and allocation errors
//! - [`service`]: Async [`LifeOs`] facade with bounded storage calls
//! - [`streak`]: Streak arithmetic, the activity store seam, and the tracker
//! - [`telemetry`]: Tracing subscriber setup

pub mod allocation;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod streak;
pub mod telemetry;

pub use service::LifeOs;
