//! Student repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `student_id` is the primary key; inserting an existing id is rejected
//!   with `RepoError::Duplicate` and leaves the stored row untouched.
//! - Deleting a student cascades to enrollments and attendance rows.

use crate::model::student::{Student, StudentId};
use crate::repo::{classify_write_error, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    fn create_student(&self, student: &Student) -> RepoResult<()>;
    fn get_student(&self, id: &str) -> RepoResult<Option<Student>>;
    /// Lists all students ordered by name, then id.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Returns whether a row was changed.
    fn rename_student(&self, id: &str, full_name: &str) -> RepoResult<bool>;
    /// Returns whether a row was removed.
    fn delete_student(&self, id: &str) -> RepoResult<bool>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO students (student_id, full_name) VALUES (?1, ?2);",
                params![student.id.as_str(), student.full_name.as_str()],
            )
            .map_err(|err| classify_write_error("students", err))?;
        Ok(())
    }

    fn get_student(&self, id: &str) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                "SELECT student_id, full_name FROM students WHERE student_id = ?1;",
                [id],
                |row| {
                    Ok(Student {
                        id: row.get::<_, StudentId>(0)?,
                        full_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(student)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(
            "SELECT student_id, full_name
             FROM students
             ORDER BY full_name ASC, student_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(Student {
                id: row.get("student_id")?,
                full_name: row.get("full_name")?,
            });
        }
        Ok(students)
    }

    fn rename_student(&self, id: &str, full_name: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE students SET full_name = ?2 WHERE student_id = ?1;",
            params![id, full_name],
        )?;
        Ok(changed > 0)
    }

    fn delete_student(&self, id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE student_id = ?1;", [id])?;
        Ok(changed > 0)
    }
}
