//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from the store facade.
//! - Classify constraint failures into semantic errors.
//!
//! # Invariants
//! - Repositories assume a connection prepared by `db::open_db*` or
//!   `db::initialize_schema` (foreign keys on, schema migrated).
//! - Read paths reject persisted values outside the typed domain instead of
//!   masking them.

use crate::db::DbError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendance_repo;
pub mod class_repo;
pub mod enrollment_repo;
pub mod report_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for attendance persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    Duplicate { table: &'static str },
    /// A FOREIGN KEY constraint rejected the write.
    MissingReference { table: &'static str },
    /// Persisted data cannot be mapped onto the domain model.
    InvalidData(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { table } => write!(f, "duplicate row rejected in `{table}`"),
            Self::MissingReference { table } => {
                write!(f, "row in `{table}` references a missing student or class")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Duplicate { .. } | Self::MissingReference { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps constraint violations raised by a write into semantic variants.
pub(crate) fn classify_write_error(table: &'static str, err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return RepoError::Duplicate { table };
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return RepoError::MissingReference { table };
            }
            _ => {}
        }
    }
    RepoError::from(err)
}
