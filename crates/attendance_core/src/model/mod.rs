//! Typed domain model for students, classes and attendance.
//!
//! # Responsibility
//! - Define the records exchanged between the store and its callers.
//! - Own input validation that must hold before anything is persisted.
//!
//! # Invariants
//! - Student ids are externally assigned and stable; class ids are assigned
//!   by the database and never reused.
//! - Attendance dates are ISO-8601 `YYYY-MM-DD`, so text order is date order.

pub mod attendance;
pub mod class;
pub mod student;
pub mod validation;
