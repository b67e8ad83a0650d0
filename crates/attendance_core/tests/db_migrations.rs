use attendance_core::db::migrations::latest_version;
use attendance_core::db::{initialize_schema, open_db, open_db_in_memory, DbError};
use attendance_core::AttendanceStore;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "students");
    assert_table_exists(&conn, "classes");
    assert_table_exists(&conn, "enrollments");
    assert_table_exists(&conn, "attendance");
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("attendance.db");

    let store = AttendanceStore::open(&path).unwrap();
    assert!(store.add_class("Biology").unwrap());
    drop(store);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let classes: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM classes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(classes, 1);
}

#[test]
fn initialize_schema_is_safe_to_repeat_on_a_plain_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    initialize_schema(&mut conn).unwrap();
    initialize_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn initialize_schema_inside_open_transaction_reports_disabled_foreign_keys() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF; BEGIN;").unwrap();

    let err = initialize_schema(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::ForeignKeysDisabled));
    assert!(err.to_string().contains("foreign key enforcement is off"));
}

#[test]
fn store_initialize_schema_prepares_a_raw_connection() {
    let mut store = AttendanceStore::new(Connection::open_in_memory().unwrap());
    store.initialize_schema().unwrap();
    store.initialize_schema().unwrap();

    assert!(store.add_student("S1", "Ada Lovelace").unwrap());
    assert_eq!(store.list_students().unwrap().len(), 1);
}

#[test]
fn unversioned_legacy_database_is_adopted_without_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE students (
            student_id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL
        );
        CREATE TABLE classes (
            class_id INTEGER PRIMARY KEY AUTOINCREMENT,
            class_name TEXT UNIQUE NOT NULL
        );
        CREATE TABLE enrollments (
            enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id TEXT NOT NULL,
            class_id INTEGER NOT NULL,
            FOREIGN KEY (student_id) REFERENCES students(student_id) ON DELETE CASCADE,
            FOREIGN KEY (class_id) REFERENCES classes(class_id) ON DELETE CASCADE,
            UNIQUE(student_id, class_id)
        );
        CREATE TABLE attendance (
            attendance_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id TEXT NOT NULL,
            class_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL,
            FOREIGN KEY (student_id) REFERENCES students(student_id) ON DELETE CASCADE,
            FOREIGN KEY (class_id) REFERENCES classes(class_id) ON DELETE CASCADE
        );
        INSERT INTO students (student_id, full_name) VALUES ('S1', 'Ada Lovelace');
        INSERT INTO classes (class_name) VALUES ('Math');
        INSERT INTO attendance (student_id, class_id, date, status)
            VALUES ('S1', 1, '2024-01-05', 'Present');",
    )
    .unwrap();
    drop(conn);

    let store = AttendanceStore::open(&path).unwrap();
    assert_eq!(schema_version(store.connection()), latest_version());
    assert_eq!(store.list_students().unwrap().len(), 1);

    let report = store
        .get_attendance_report(1, "2024-01-01", "2024-01-31")
        .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].full_name, "Ada Lovelace");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
