//! Class repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `class_name` is unique; duplicates surface as `RepoError::Duplicate`
//!   on both insert and rename.
//! - `class_id` comes from `AUTOINCREMENT` and is never reused.
//! - Deleting a class cascades to enrollments and attendance rows.

use crate::model::class::{Class, ClassId};
use crate::repo::{classify_write_error, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for class CRUD operations.
pub trait ClassRepository {
    /// Inserts a class and returns its assigned id.
    fn create_class(&self, name: &str) -> RepoResult<ClassId>;
    fn get_class(&self, id: ClassId) -> RepoResult<Option<Class>>;
    /// Lists all classes ordered by name.
    fn list_classes(&self) -> RepoResult<Vec<Class>>;
    /// Returns whether a row was changed.
    fn rename_class(&self, id: ClassId, name: &str) -> RepoResult<bool>;
    /// Returns whether a row was removed.
    fn delete_class(&self, id: ClassId) -> RepoResult<bool>;
}

/// SQLite-backed class repository.
pub struct SqliteClassRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClassRepository for SqliteClassRepository<'_> {
    fn create_class(&self, name: &str) -> RepoResult<ClassId> {
        self.conn
            .execute("INSERT INTO classes (class_name) VALUES (?1);", [name])
            .map_err(|err| classify_write_error("classes", err))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_class(&self, id: ClassId) -> RepoResult<Option<Class>> {
        let class = self
            .conn
            .query_row(
                "SELECT class_id, class_name FROM classes WHERE class_id = ?1;",
                [id],
                |row| {
                    Ok(Class {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(class)
    }

    fn list_classes(&self) -> RepoResult<Vec<Class>> {
        let mut stmt = self.conn.prepare(
            "SELECT class_id, class_name
             FROM classes
             ORDER BY class_name ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut classes = Vec::new();
        while let Some(row) = rows.next()? {
            classes.push(Class {
                id: row.get("class_id")?,
                name: row.get("class_name")?,
            });
        }
        Ok(classes)
    }

    fn rename_class(&self, id: ClassId, name: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute(
                "UPDATE classes SET class_name = ?2 WHERE class_id = ?1;",
                params![id, name],
            )
            .map_err(|err| classify_write_error("classes", err))?;
        Ok(changed > 0)
    }

    fn delete_class(&self, id: ClassId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM classes WHERE class_id = ?1;", [id])?;
        Ok(changed > 0)
    }
}
