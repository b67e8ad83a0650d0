//! Enrollment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - A (student, class) pair is stored at most once (`UNIQUE` constraint).
//! - Both sides must exist; a dangling pair surfaces as
//!   `RepoError::MissingReference`.

use crate::model::class::ClassId;
use crate::model::student::Student;
use crate::repo::{classify_write_error, RepoResult};
use rusqlite::{params, Connection};

/// Repository interface for class membership.
pub trait EnrollmentRepository {
    fn enroll(&self, student_id: &str, class_id: ClassId) -> RepoResult<()>;
    /// Lists enrolled students ordered by name, then id.
    fn list_students_in_class(&self, class_id: ClassId) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEnrollmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn enroll(&self, student_id: &str, class_id: ClassId) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO enrollments (student_id, class_id) VALUES (?1, ?2);",
                params![student_id, class_id],
            )
            .map_err(|err| classify_write_error("enrollments", err))?;
        Ok(())
    }

    fn list_students_in_class(&self, class_id: ClassId) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.student_id, s.full_name
             FROM students s
             INNER JOIN enrollments e ON e.student_id = s.student_id
             WHERE e.class_id = ?1
             ORDER BY s.full_name ASC, s.student_id ASC;",
        )?;
        let mut rows = stmt.query([class_id])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(Student {
                id: row.get(0)?,
                full_name: row.get(1)?,
            });
        }
        Ok(students)
    }
}
