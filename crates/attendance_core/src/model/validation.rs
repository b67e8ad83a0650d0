//! Input validation errors shared by the domain model.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected caller input, detected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Student id is empty after trimming.
    EmptyStudentId,
    /// Student full name is empty after trimming.
    EmptyStudentName,
    /// Class name is empty after trimming.
    EmptyClassName,
    /// Date is not a real `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Status is not one of the known attendance labels.
    InvalidStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentId => write!(f, "student id cannot be empty"),
            Self::EmptyStudentName => write!(f, "student full name cannot be empty"),
            Self::EmptyClassName => write!(f, "class name cannot be empty"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidStatus(value) => {
                write!(f, "invalid attendance status `{value}`; expected Present|Absent|Late")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and returns it when anything remains.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
