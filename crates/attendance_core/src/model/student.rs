//! Student domain model.

use crate::model::validation::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// Externally assigned institutional identifier (primary key).
pub type StudentId = String;

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
}

impl Student {
    /// Builds a student from raw input.
    ///
    /// The id is kept verbatim; only the name is trimmed.
    ///
    /// # Errors
    /// - `EmptyStudentId` / `EmptyStudentName` for blank input.
    pub fn new(id: &str, full_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: checked_student_id(id)?,
            full_name: normalize_student_name(full_name)?,
        })
    }
}

/// Rejects blank ids and otherwise returns `id` unchanged.
pub(crate) fn checked_student_id(id: &str) -> Result<StudentId, ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyStudentId);
    }
    Ok(id.to_string())
}

pub(crate) fn normalize_student_name(full_name: &str) -> Result<String, ValidationError> {
    non_blank(full_name).ok_or(ValidationError::EmptyStudentName)
}
