//! Core persistence for class attendance tracking.
//! This crate is the single source of truth for attendance invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{initialize_schema, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::attendance::{
    AttendanceDate, AttendanceMark, AttendanceStatus, DateRange, ReportRow,
    REPORT_COLUMNS,
};
pub use model::class::{Class, ClassId};
pub use model::student::{Student, StudentId};
pub use model::validation::ValidationError;
pub use repo::attendance_repo::MarkOutcome;
pub use repo::{RepoError, RepoResult};
pub use service::attendance_store::{AttendanceStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
