pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Busy timeout applied by [`open_database`].
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open (or create) the LifeOS database at the given path with the schema
/// initialized.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    open_database_with(path, DEFAULT_BUSY_TIMEOUT)
}

/// Like [`open_database`], with an explicit busy timeout.
pub fn open_database_with(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Connection> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // Enable WAL mode
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.busy_timeout(busy_timeout)?;

    schema::init_schema(&conn).context("failed to initialize schema")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with the schema applied.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    Ok(conn)
}

/// Result of [`check_database_health`].
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub schema_version: u32,
    pub integrity_ok: bool,
    /// Raw `PRAGMA integrity_check` output when the check fails.
    pub integrity_details: String,
    pub activity_count: u64,
    pub streak_count: u64,
    pub user_count: u64,
}

/// Run an integrity check and gather row counts.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let schema_version = schema::get_schema_version(conn)?;

    let integrity: Vec<String> = conn
        .prepare("PRAGMA integrity_check")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    let integrity_ok = integrity.len() == 1 && integrity[0] == "ok";

    let count = |sql: &str| -> Result<u64> {
        let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as u64)
    };

    Ok(HealthReport {
        schema_version,
        integrity_ok,
        integrity_details: if integrity_ok { String::new() } else { integrity.join("; ") },
        activity_count: count("SELECT COUNT(*) FROM activity_records")?,
        streak_count: count("SELECT COUNT(*) FROM user_streaks")?,
        user_count: count("SELECT COUNT(DISTINCT user_id) FROM activity_records")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_database_has_schema() {
        let conn = open_memory_database().unwrap();
        assert_eq!(
            schema::get_schema_version(&conn).unwrap(),
            schema::SCHEMA_VERSION
        );
    }

    #[test]
    fn health_report_on_empty_db() {
        let conn = open_memory_database().unwrap();
        let report = check_database_health(&conn).unwrap();
        assert!(report.integrity_ok);
        assert!(report.integrity_details.is_empty());
        assert_eq!(report.activity_count, 0);
        assert_eq!(report.streak_count, 0);
        assert_eq!(report.user_count, 0);
    }
}
