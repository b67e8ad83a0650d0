//! Class domain model.

use crate::model::validation::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// Surrogate id assigned by SQLite `AUTOINCREMENT`.
pub type ClassId = i64;

/// One row of the `classes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
}

pub(crate) fn normalize_class_name(name: &str) -> Result<String, ValidationError> {
    non_blank(name).ok_or(ValidationError::EmptyClassName)
}
