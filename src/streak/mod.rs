//! Consecutive-day activity streaks.
//!
//! - [`compute`]: pure streak arithmetic ([`compute_streak`], state transitions)
//! - [`store`]: the [`ActivityStore`] persistence seam and its SQLite implementation
//! - [`tracker`]: [`StreakTracker`], which records activity days and reads streaks
//! - [`types`]: [`ActivityKind`], [`StreakState`], [`DayWrite`], [`DayCommit`]

pub mod compute;
pub mod store;
pub mod tracker;
pub mod types;

pub use compute::compute_streak;
pub use store::ActivityStore;
pub use tracker::StreakTracker;
pub use types::{ActivityKind, DayCommit, DayWrite, StreakState};

/// Days [`compute_streak`] walks back by default.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
