//! Typed errors returned across the component boundary.
//!
//! Storage failures are always recoverable: the caller decides whether to
//! retry, surface a message, or drop the write.

use std::time::Duration;

use thiserror::Error;

/// Failure talking to the activity store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("db lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage task failed: {0}")]
    Task(String),

    #[error("corrupt {column} value in stored row: {value}")]
    Corrupt { column: &'static str, value: String },
}

/// A budget plan the caller must not persist.
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("total amount must not be negative (got {0})")]
    NegativeTotal(f64),

    #[error("allocated {allocated:.2} exceeds the total of {total:.2}")]
    OverAllocated { allocated: f64, total: f64 },
}
