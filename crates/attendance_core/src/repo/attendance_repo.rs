//! Attendance repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Record one status per (student, class, date) triple.
//!
//! # Invariants
//! - Marks run inside an IMMEDIATE transaction: the write lock is held
//!   before the existing triple is looked up, so concurrent writers on the
//!   same file cannot both insert the same triple.
//! - A batch mark commits all entries or none.

use crate::model::attendance::{AttendanceDate, AttendanceMark, AttendanceStatus};
use crate::model::class::ClassId;
use crate::repo::{classify_write_error, RepoResult};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// What a mark did to the stored triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// No record existed; a new one was inserted.
    Inserted,
    /// An existing record had its status overwritten.
    Updated,
}

/// Repository interface for attendance writes.
pub trait AttendanceRepository {
    fn mark(
        &mut self,
        student_id: &str,
        class_id: ClassId,
        date: &AttendanceDate,
        status: AttendanceStatus,
    ) -> RepoResult<MarkOutcome>;
    /// Marks every entry for one class and date in a single transaction.
    fn mark_batch(
        &mut self,
        class_id: ClassId,
        date: &AttendanceDate,
        marks: &[AttendanceMark],
    ) -> RepoResult<Vec<MarkOutcome>>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn mark(
        &mut self,
        student_id: &str,
        class_id: ClassId,
        date: &AttendanceDate,
        status: AttendanceStatus,
    ) -> RepoResult<MarkOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let outcome = mark_in_tx(&tx, student_id, class_id, date, status)?;
        tx.commit()?;
        Ok(outcome)
    }

    fn mark_batch(
        &mut self,
        class_id: ClassId,
        date: &AttendanceDate,
        marks: &[AttendanceMark],
    ) -> RepoResult<Vec<MarkOutcome>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut outcomes = Vec::with_capacity(marks.len());
        for mark in marks {
            outcomes.push(mark_in_tx(
                &tx,
                mark.student_id.as_str(),
                class_id,
                date,
                mark.status,
            )?);
        }
        tx.commit()?;
        Ok(outcomes)
    }
}

fn mark_in_tx(
    tx: &Transaction<'_>,
    student_id: &str,
    class_id: ClassId,
    date: &AttendanceDate,
    status: AttendanceStatus,
) -> RepoResult<MarkOutcome> {
    let updated = tx.execute(
        "UPDATE attendance
         SET status = ?4
         WHERE student_id = ?1
           AND class_id = ?2
           AND date = ?3;",
        params![student_id, class_id, date.as_str(), status.as_str()],
    )?;
    if updated > 0 {
        return Ok(MarkOutcome::Updated);
    }

    tx.execute(
        "INSERT INTO attendance (student_id, class_id, date, status)
         VALUES (?1, ?2, ?3, ?4);",
        params![student_id, class_id, date.as_str(), status.as_str()],
    )
    .map_err(|err| classify_write_error("attendance", err))?;
    Ok(MarkOutcome::Inserted)
}
