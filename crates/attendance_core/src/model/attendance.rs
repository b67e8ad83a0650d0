//! Attendance domain model.
//!
//! # Responsibility
//! - Define the closed attendance status set and its on-disk labels.
//! - Validate ISO-8601 dates and inclusive date ranges used by reports.
//!
//! # Invariants
//! - `AttendanceStatus` labels are persisted verbatim (`Present|Absent|Late`).
//! - `AttendanceDate` always holds a real calendar date in `YYYY-MM-DD` form,
//!   so lexicographic comparison in SQL equals chronological comparison.

use crate::model::student::StudentId;
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

/// Column headers of an attendance report, in row order.
pub const REPORT_COLUMNS: [&str; 4] = ["Student ID", "Full Name", "Date", "Status"];

/// Attendance state recorded for one student, class and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    /// Every status, in the order offered to users.
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    /// Label stored in `attendance.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    /// Accepts the stored labels case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidStatus(value.to_string()))
    }
}

/// Calendar date in `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttendanceDate(String);

impl AttendanceDate {
    /// Parses and validates an ISO-8601 calendar date.
    ///
    /// # Errors
    /// - `InvalidDate` when the shape is wrong or the day does not exist
    ///   (e.g. `2023-02-29`).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let invalid = || ValidationError::InvalidDate(value.to_string());
        let captures = ISO_DATE_RE.captures(trimmed).ok_or_else(invalid)?;

        let year: u32 = captures[1].parse().map_err(|_| invalid())?;
        let month: u32 = captures[2].parse().map_err(|_| invalid())?;
        let day: u32 = captures[3].parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(invalid());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for AttendanceDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AttendanceDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for AttendanceDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AttendanceDate> for String {
    fn from(value: AttendanceDate) -> Self {
        value.0
    }
}

/// Inclusive `[start, end]` date window for reports.
///
/// `start > end` is accepted and matches no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: AttendanceDate,
    pub end: AttendanceDate,
}

impl DateRange {
    pub fn new(start: AttendanceDate, end: AttendanceDate) -> Self {
        Self { start, end }
    }

    /// Parses both bounds from raw `YYYY-MM-DD` text.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            AttendanceDate::parse(start)?,
            AttendanceDate::parse(end)?,
        ))
    }

    pub fn contains(&self, date: &AttendanceDate) -> bool {
        &self.start <= date && date <= &self.end
    }
}

/// Status to record for one student in a batch mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

impl AttendanceMark {
    pub fn new(student_id: impl Into<StudentId>, status: AttendanceStatus) -> Self {
        Self {
            student_id: student_id.into(),
            status,
        }
    }
}

/// Report line: attendance joined to the student's current name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub student_id: StudentId,
    pub full_name: String,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
}

impl ReportRow {
    /// Cell values in `REPORT_COLUMNS` order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.student_id.as_str(),
            self.full_name.as_str(),
            self.date.as_str(),
            self.status.as_str(),
        ]
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::{AttendanceDate, AttendanceStatus, DateRange, ReportRow, REPORT_COLUMNS};
    use crate::model::validation::ValidationError;

    #[test]
    fn status_parses_labels_case_insensitively() {
        assert_eq!("present".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Present));
        assert_eq!(" LATE ".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
        assert_eq!("Absent".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Absent));
    }

    #[test]
    fn status_rejects_unknown_label() {
        let err = "Excused".parse::<AttendanceStatus>().unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("Excused".to_string()));
    }

    #[test]
    fn date_accepts_leap_day_only_in_leap_years() {
        assert!(AttendanceDate::parse("2024-02-29").is_ok());
        assert!(AttendanceDate::parse("2000-02-29").is_ok());
        assert!(AttendanceDate::parse("2023-02-29").is_err());
        assert!(AttendanceDate::parse("1900-02-29").is_err());
    }

    #[test]
    fn date_rejects_malformed_input() {
        for value in ["2024-1-05", "2024/01/05", "2024-13-01", "2024-04-31", "", "05-01-2024"] {
            assert!(
                AttendanceDate::parse(value).is_err(),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn range_contains_bounds_inclusively() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert!(range.contains(&AttendanceDate::parse("2024-01-01").unwrap()));
        assert!(range.contains(&AttendanceDate::parse("2024-01-31").unwrap()));
        assert!(!range.contains(&AttendanceDate::parse("2024-02-01").unwrap()));
    }

    #[test]
    fn report_cells_follow_column_order() {
        let row = ReportRow {
            student_id: "S1".to_string(),
            full_name: "Ada".to_string(),
            date: AttendanceDate::parse("2024-01-05").unwrap(),
            status: AttendanceStatus::Late,
        };
        assert_eq!(REPORT_COLUMNS.len(), row.cells().len());
        assert_eq!(row.cells(), ["S1", "Ada", "2024-01-05", "Late"]);
    }
}
