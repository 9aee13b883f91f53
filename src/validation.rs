//! Validation helper functions
//!
//! Turns user-supplied strings into typed task values. Every failure is a
//! `TaskError::Validation` naming the offending field. Parsing here is exact;
//! loosely typed input is folded to canonical spelling by the shell first.

use crate::error::{Result, TaskError};
use crate::task::{DATE_FORMAT, Priority, Status};
use chrono::NaiveDate;

/// Parse a due date in YYYY-MM-DD format
///
/// The string must name a real calendar day: `2026-02-30` is rejected.
pub fn parse_due_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
        TaskError::validation(
            "due_date",
            format!(
                "'{}' is not a valid date. Use YYYY-MM-DD (e.g., '2026-03-15')",
                date_str
            ),
        )
    })
}

/// Parse a canonical priority name (`Low`, `Medium`, `High`)
pub fn parse_priority(priority_str: &str) -> Result<Priority> {
    priority_str.parse()
}

/// Parse a canonical status name (`Pending`, `In Progress`, `Completed`)
pub fn parse_status(status_str: &str) -> Result<Status> {
    status_str.parse()
}

/// Require a title that is not blank
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskError::validation("title", "Title cannot be empty"));
    }
    Ok(())
}

/// Normalize task ID by trimming surrounding whitespace
pub fn normalize_task_id(task_id: &str) -> String {
    task_id.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_date_valid() {
        let date = parse_due_date("2026-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
    }

    #[test]
    fn test_parse_due_date_rejects_impossible_day() {
        let err = parse_due_date("2026-13-45").unwrap_err();
        assert!(matches!(err, TaskError::Validation { ref field, .. } if field == "due_date"));
        assert!(parse_due_date("2026-02-30").is_err());
        assert!(parse_due_date("10/01/2026").is_err());
        assert!(parse_due_date("").is_err());
    }

    #[test]
    fn test_parse_due_date_rejects_padding() {
        assert!(parse_due_date(" 2026-01-10 ").is_err());
    }

    #[test]
    fn test_parse_priority_is_exact() {
        assert_eq!(parse_priority("Medium").unwrap(), Priority::Medium);
        let err = parse_priority("high").unwrap_err();
        assert!(matches!(err, TaskError::Validation { ref field, .. } if field == "priority"));
        assert!(parse_priority("Urgent").is_err());
    }

    #[test]
    fn test_parse_status_is_exact() {
        assert_eq!(parse_status("In Progress").unwrap(), Status::InProgress);
        assert_eq!(parse_status("Completed").unwrap(), Status::Completed);
        assert!(parse_status("inprogress").is_err());
        assert!(parse_status("done").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Write report").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_normalize_task_id() {
        assert_eq!(normalize_task_id(" 3f9c2a1b "), "3f9c2a1b");
    }
}
