//! SQL DDL for the LifeOS activity store.
//!
//! Defines the `activity_records`, `user_streaks`, and `schema_meta` tables.
//! All DDL uses `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
-- One row per (user, day, kind). A day is active when any kind is present.
CREATE TABLE IF NOT EXISTS activity_records (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    activity_date TEXT NOT NULL,
    activity_kind TEXT NOT NULL CHECK(activity_kind IN ('login','mood_entry','journal_entry','course_progress','health_log','finance_update')),
    created_at TEXT NOT NULL,
    UNIQUE(user_id, activity_date, activity_kind)
);

CREATE INDEX IF NOT EXISTS idx_activity_user_date ON activity_records(user_id, activity_date);
CREATE INDEX IF NOT EXISTS idx_activity_kind ON activity_records(activity_kind);

-- Materialized streak state, one row per user
CREATE TABLE IF NOT EXISTS user_streaks (
    user_id TEXT PRIMARY KEY,
    current_streak INTEGER NOT NULL DEFAULT 0 CHECK(current_streak >= 0),
    longest_streak INTEGER NOT NULL DEFAULT 0 CHECK(longest_streak >= current_streak),
    streak_start_date TEXT,
    last_activity_date TEXT,
    total_active_days INTEGER NOT NULL DEFAULT 0 CHECK(total_active_days >= 0),
    updated_at TEXT NOT NULL
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Version recorded in `schema_meta` by [`init_schema`].
pub const SCHEMA_VERSION: u32 = 1;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Schema version stored in `schema_meta`; 0 when the value is unreadable.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}
