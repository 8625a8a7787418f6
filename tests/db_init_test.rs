mod helpers;

use rusqlite::Connection;

fn names(conn: &Connection, kind: &str) -> Vec<String> {
    conn.prepare("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name")
        .unwrap()
        .query_map([kind], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn full_schema_creates_all_tables_and_indexes() {
    let conn = helpers::test_db();

    let tables = names(&conn, "table");
    for expected in ["activity_records", "schema_meta", "user_streaks"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
    }

    let indexes = names(&conn, "index");
    for expected in ["idx_activity_kind", "idx_activity_user_date"] {
        assert!(indexes.iter().any(|i| i == expected), "missing index {expected}");
    }
}

#[test]
fn activity_kind_check_constraint_rejects_unknown_kind() {
    let conn = helpers::test_db();
    let result = conn.execute(
        "INSERT INTO activity_records (id, user_id, activity_date, activity_kind, created_at)
         VALUES ('a1', 'u1', '2024-01-01', 'sleep_log', '2024-01-01T00:00:00Z')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn duplicate_activity_row_is_rejected() {
    let conn = helpers::test_db();
    let insert = |id: &str| {
        conn.execute(
            "INSERT INTO activity_records (id, user_id, activity_date, activity_kind, created_at)
             VALUES (?1, 'u1', '2024-01-01', 'login', '2024-01-01T00:00:00Z')",
            [id],
        )
    };
    insert("a1").unwrap();
    assert!(insert("a2").is_err());
}

#[test]
fn longest_below_current_is_rejected() {
    let conn = helpers::test_db();
    let result = conn.execute(
        "INSERT INTO user_streaks (user_id, current_streak, longest_streak, last_activity_date, total_active_days, updated_at)
         VALUES ('u1', 5, 3, '2024-01-05', 5, '2024-01-05T00:00:00Z')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn schema_version_row_is_present() {
    let conn = helpers::test_db();
    let version: String = conn
        .query_row(
            "SELECT value FROM schema_meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, "1");
}
