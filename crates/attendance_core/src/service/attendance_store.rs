//! Attendance store facade.
//!
//! # Responsibility
//! - Expose the student/class/enrollment/attendance use-cases to callers
//!   (UI, CLI) over one caller-owned SQLite connection.
//! - Turn expected constraint failures into `false` results and propagate
//!   everything else as `StoreError`.
//!
//! # Invariants
//! - Input is validated before any SQL runs.
//! - Each call is its own transaction scope; no call spans another.
//! - Log events carry class ids and counts only, never student names.

use crate::db::{self, open_db, open_db_in_memory, DbError};
use crate::model::attendance::{AttendanceDate, AttendanceMark, AttendanceStatus, DateRange, ReportRow};
use crate::model::class::{normalize_class_name, Class, ClassId};
use crate::model::student::{checked_student_id, normalize_student_name, Student};
use crate::model::validation::ValidationError;
use crate::repo::attendance_repo::{AttendanceRepository, MarkOutcome, SqliteAttendanceRepository};
use crate::repo::class_repo::{ClassRepository, SqliteClassRepository};
use crate::repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
use crate::repo::report_repo::{ReportRepository, SqliteReportRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use crate::repo::RepoError;
use log::{debug, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type StoreResult<T> = Result<T, StoreError>;

/// Unexpected store failure. Expected duplicates never reach this type.
#[derive(Debug)]
pub enum StoreError {
    /// Caller input rejected before touching the database.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Persistence facade over students, classes, enrollments and attendance.
pub struct AttendanceStore {
    conn: Connection,
}

impl AttendanceStore {
    /// Wraps a caller-provided connection.
    ///
    /// The connection is used as-is; call `initialize_schema` unless it came
    /// from `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a database file with the schema applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a fresh in-memory database with the schema applied.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the underlying connection back to the caller.
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    /// Ensures all tables exist and foreign keys are enforced. Idempotent.
    pub fn initialize_schema(&mut self) -> StoreResult<()> {
        db::initialize_schema(&mut self.conn)?;
        Ok(())
    }

    /// Adds a student.
    ///
    /// Returns `Ok(false)` when the id already exists; the stored row is
    /// left unmodified.
    pub fn add_student(&self, id: &str, full_name: &str) -> StoreResult<bool> {
        let student = Student::new(id, full_name)?;
        let repo = SqliteStudentRepository::new(&self.conn);
        match repo.create_student(&student) {
            Ok(()) => {
                debug!("event=student_add module=store status=ok");
                Ok(true)
            }
            Err(RepoError::Duplicate { .. }) => {
                info!("event=student_add module=store status=duplicate");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists all students ordered by full name.
    pub fn list_students(&self) -> StoreResult<Vec<Student>> {
        Ok(SqliteStudentRepository::new(&self.conn).list_students()?)
    }

    /// Looks up one student by id.
    pub fn get_student(&self, id: &str) -> StoreResult<Option<Student>> {
        Ok(SqliteStudentRepository::new(&self.conn).get_student(id)?)
    }

    /// Renames a student. Unknown ids are a no-op.
    pub fn update_student(&self, id: &str, full_name: &str) -> StoreResult<()> {
        let id = checked_student_id(id)?;
        let full_name = normalize_student_name(full_name)?;
        let changed =
            SqliteStudentRepository::new(&self.conn).rename_student(&id, &full_name)?;
        debug!(
            "event=student_update module=store status={}",
            if changed { "ok" } else { "noop" }
        );
        Ok(())
    }

    /// Deletes a student together with its enrollments and attendance.
    /// Unknown ids are a no-op.
    pub fn delete_student(&self, id: &str) -> StoreResult<()> {
        let id = checked_student_id(id)?;
        let removed = SqliteStudentRepository::new(&self.conn).delete_student(&id)?;
        info!(
            "event=student_delete module=store status={}",
            if removed { "ok" } else { "noop" }
        );
        Ok(())
    }

    /// Adds a class.
    ///
    /// Returns `Ok(false)` when the name is already taken.
    pub fn add_class(&self, name: &str) -> StoreResult<bool> {
        let name = normalize_class_name(name)?;
        match SqliteClassRepository::new(&self.conn).create_class(&name) {
            Ok(class_id) => {
                debug!("event=class_add module=store status=ok class_id={class_id}");
                Ok(true)
            }
            Err(RepoError::Duplicate { .. }) => {
                info!("event=class_add module=store status=duplicate");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists all classes ordered by name.
    pub fn list_classes(&self) -> StoreResult<Vec<Class>> {
        Ok(SqliteClassRepository::new(&self.conn).list_classes()?)
    }

    /// Looks up one class by id.
    pub fn get_class(&self, id: ClassId) -> StoreResult<Option<Class>> {
        Ok(SqliteClassRepository::new(&self.conn).get_class(id)?)
    }

    /// Renames a class. Unknown ids are a no-op and return `Ok(true)`.
    ///
    /// Returns `Ok(false)` when another class already uses `name`.
    pub fn update_class(&self, id: ClassId, name: &str) -> StoreResult<bool> {
        let name = normalize_class_name(name)?;
        match SqliteClassRepository::new(&self.conn).rename_class(id, &name) {
            Ok(changed) => {
                debug!(
                    "event=class_update module=store status={} class_id={id}",
                    if changed { "ok" } else { "noop" }
                );
                Ok(true)
            }
            Err(RepoError::Duplicate { .. }) => {
                info!("event=class_update module=store status=duplicate class_id={id}");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a class together with its enrollments and attendance.
    /// Unknown ids are a no-op.
    pub fn delete_class(&self, id: ClassId) -> StoreResult<()> {
        let removed = SqliteClassRepository::new(&self.conn).delete_class(id)?;
        info!(
            "event=class_delete module=store status={} class_id={id}",
            if removed { "ok" } else { "noop" }
        );
        Ok(())
    }

    /// Enrolls a student in a class.
    ///
    /// Returns `Ok(false)` when the pair already exists or either side is
    /// missing.
    pub fn enroll_student(&self, student_id: &str, class_id: ClassId) -> StoreResult<bool> {
        let student_id = checked_student_id(student_id)?;
        match SqliteEnrollmentRepository::new(&self.conn).enroll(&student_id, class_id) {
            Ok(()) => {
                debug!("event=enroll module=store status=ok class_id={class_id}");
                Ok(true)
            }
            Err(RepoError::Duplicate { .. }) => {
                info!("event=enroll module=store status=duplicate class_id={class_id}");
                Ok(false)
            }
            Err(RepoError::MissingReference { .. }) => {
                warn!("event=enroll module=store status=missing_reference class_id={class_id}");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Students enrolled in a class ordered by name; empty for unknown ids.
    pub fn list_students_in_class(&self, class_id: ClassId) -> StoreResult<Vec<Student>> {
        Ok(SqliteEnrollmentRepository::new(&self.conn).list_students_in_class(class_id)?)
    }

    /// Records `status` for the triple, overwriting any existing status.
    ///
    /// # Errors
    /// - `Validation` for a malformed date or blank student id.
    /// - `Repo(MissingReference)` when the student or class does not exist.
    pub fn mark_attendance(
        &mut self,
        student_id: &str,
        class_id: ClassId,
        date: &str,
        status: AttendanceStatus,
    ) -> StoreResult<MarkOutcome> {
        let student_id = checked_student_id(student_id)?;
        let date = AttendanceDate::parse(date)?;
        let outcome = SqliteAttendanceRepository::new(&mut self.conn).mark(
            &student_id,
            class_id,
            &date,
            status,
        )?;
        debug!(
            "event=attendance_mark module=store status=ok outcome={:?} class_id={class_id}",
            outcome
        );
        Ok(outcome)
    }

    /// Records a roster of statuses for one class and date atomically.
    ///
    /// Either every mark is stored or none is.
    pub fn mark_attendance_batch(
        &mut self,
        class_id: ClassId,
        date: &str,
        marks: &[AttendanceMark],
    ) -> StoreResult<Vec<MarkOutcome>> {
        let date = AttendanceDate::parse(date)?;
        let mut normalized = Vec::with_capacity(marks.len());
        for mark in marks {
            normalized.push(AttendanceMark::new(
                checked_student_id(&mark.student_id)?,
                mark.status,
            ));
        }

        let outcomes = SqliteAttendanceRepository::new(&mut self.conn).mark_batch(
            class_id,
            &date,
            &normalized,
        )?;
        info!(
            "event=attendance_mark_batch module=store status=ok class_id={class_id} count={}",
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Statuses already recorded for a class on one date, ordered by name.
    pub fn attendance_for_date(
        &self,
        class_id: ClassId,
        date: &str,
    ) -> StoreResult<Vec<ReportRow>> {
        let date = AttendanceDate::parse(date)?;
        Ok(SqliteReportRepository::new(&self.conn).records_on(class_id, &date)?)
    }

    /// Attendance of a class within `[start_date, end_date]` inclusive,
    /// ordered by date then student name.
    pub fn get_attendance_report(
        &self,
        class_id: ClassId,
        start_date: &str,
        end_date: &str,
    ) -> StoreResult<Vec<ReportRow>> {
        let range = DateRange::parse(start_date, end_date)?;
        let report = SqliteReportRepository::new(&self.conn).report(class_id, &range)?;
        debug!(
            "event=attendance_report module=store status=ok class_id={class_id} rows={}",
            report.len()
        );
        Ok(report)
    }
}
