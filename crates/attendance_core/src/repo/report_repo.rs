//! Attendance report queries.
//!
//! # Invariants
//! - Date filters compare `YYYY-MM-DD` text, which orders chronologically.
//! - Report rows are ordered by date, then student name, then student id.
//! - Every row carries the student's current name (join, not snapshot).
//! - Unparseable stored rows fail the query and name their `attendance_id`.

use crate::model::attendance::{AttendanceDate, AttendanceStatus, DateRange, ReportRow};
use crate::model::class::ClassId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const REPORT_SELECT_SQL: &str = "SELECT
    a.attendance_id,
    s.student_id,
    s.full_name,
    a.date,
    a.status
FROM attendance a
INNER JOIN students s ON s.student_id = a.student_id";

/// Repository interface for read-only attendance projections.
pub trait ReportRepository {
    /// Records of a class whose date falls in `range` (inclusive).
    fn report(&self, class_id: ClassId, range: &DateRange) -> RepoResult<Vec<ReportRow>>;
    /// Records of a class on exactly one date, ordered by name.
    fn records_on(&self, class_id: ClassId, date: &AttendanceDate) -> RepoResult<Vec<ReportRow>>;
}

/// SQLite-backed report repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn report(&self, class_id: ClassId, range: &DateRange) -> RepoResult<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REPORT_SELECT_SQL}
             WHERE a.class_id = ?1
               AND a.date BETWEEN ?2 AND ?3
             ORDER BY a.date ASC, s.full_name ASC, s.student_id ASC;"
        ))?;
        let mut rows = stmt.query(params![class_id, range.start.as_str(), range.end.as_str()])?;
        let mut report = Vec::new();
        while let Some(row) = rows.next()? {
            report.push(parse_report_row(row)?);
        }
        Ok(report)
    }

    fn records_on(&self, class_id: ClassId, date: &AttendanceDate) -> RepoResult<Vec<ReportRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REPORT_SELECT_SQL}
             WHERE a.class_id = ?1
               AND a.date = ?2
             ORDER BY s.full_name ASC, s.student_id ASC;"
        ))?;
        let mut rows = stmt.query(params![class_id, date.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_report_row(row)?);
        }
        Ok(records)
    }
}

fn parse_report_row(row: &Row<'_>) -> RepoResult<ReportRow> {
    let attendance_id: i64 = row.get("attendance_id")?;

    let date_text: String = row.get("date")?;
    let date = AttendanceDate::parse(&date_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in attendance.date (attendance_id={attendance_id})"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = status_text.parse::<AttendanceStatus>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid attendance status `{status_text}` in attendance.status (attendance_id={attendance_id})"
        ))
    })?;

    Ok(ReportRow {
        student_id: row.get("student_id")?,
        full_name: row.get("full_name")?,
        date,
        status,
    })
}
