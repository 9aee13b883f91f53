//! Task domain model
//!
//! The `Task` record plus the closed enumerations that describe it. Priority and
//! status are real enums so that an unknown value can never be stored; string
//! parsing happens at the edges in [`crate::validation`].

use crate::error::TaskError;
use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Format of the persisted `created_at` timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the persisted `due_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local time truncated to whole seconds, matching the persisted precision
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Task priority
///
/// Ordered by severity for sorting: `High` sorts before `Medium`, which sorts
/// before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Severity rank; lower ranks sort first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            _ => Err(TaskError::validation(
                "priority",
                format!("'{}' is not a priority. Valid options are: Low, Medium, High", s),
            )),
        }
    }
}

/// Task status
///
/// Nominal progression is Pending -> In Progress -> Completed, but updates may
/// set any member directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Status::Pending),
            "In Progress" => Ok(Status::InProgress),
            "Completed" => Ok(Status::Completed),
            _ => Err(TaskError::validation(
                "status",
                format!(
                    "'{}' is not a status. Valid options are: Pending, In Progress, Completed",
                    s
                ),
            )),
        }
    }
}

/// A single tracked task, stored as one document in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Due date (persisted as YYYY-MM-DD)
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
    /// Creation time, never changed after insert
    #[serde(with = "timestamp_format")]
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Build a fresh `Pending` task stamped with the current local time
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            due_date,
            priority,
            status: Status::Pending,
            created_at: local_now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Due date in its persisted `YYYY-MM-DD` form
    pub fn due_date_string(&self) -> String {
        self.due_date.format(DATE_FORMAT).to_string()
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(D::Error::custom)
    }
}

/// Partial update applied by the storage gateway
///
/// `None` leaves the field untouched. `id` and `created_at` are not updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

/// Field a task list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Priority,
    CreatedAt,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "due_date",
            SortKey::Priority => "priority",
            SortKey::CreatedAt => "created_at",
        }
    }

    /// Ascending comparison of two tasks under this key
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl FromStr for SortKey {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due_date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "created_at" => Ok(SortKey::CreatedAt),
            _ => Err(TaskError::validation(
                "sort key",
                format!(
                    "'{}' is not a sort key. Valid options are: due_date, priority, created_at",
                    s
                ),
            )),
        }
    }
}

/// Field a task list can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCriterion {
    Priority,
    Status,
    DueDate,
}

impl FilterCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCriterion::Priority => "priority",
            FilterCriterion::Status => "status",
            FilterCriterion::DueDate => "due_date",
        }
    }

    /// Exact string match against the persisted form of the field
    pub fn matches(&self, task: &Task, value: &str) -> bool {
        match self {
            FilterCriterion::Priority => task.priority.as_str() == value,
            FilterCriterion::Status => task.status.as_str() == value,
            FilterCriterion::DueDate => task.due_date_string() == value,
        }
    }
}

impl FromStr for FilterCriterion {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(FilterCriterion::Priority),
            "status" => Ok(FilterCriterion::Status),
            "due_date" => Ok(FilterCriterion::DueDate),
            _ => Err(TaskError::validation(
                "filter criterion",
                format!(
                    "'{}' is not a filter criterion. Valid options are: priority, status, due_date",
                    s
                ),
            )),
        }
    }
}

/// Task field that can be changed by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Priority,
    Status,
}

impl FromStr for TaskField {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(TaskField::Title),
            "description" => Ok(TaskField::Description),
            "due_date" => Ok(TaskField::DueDate),
            "priority" => Ok(TaskField::Priority),
            "status" => Ok(TaskField::Status),
            "id" | "created_at" => Err(TaskError::validation(
                "field",
                format!("'{}' cannot be changed after creation", s),
            )),
            _ => Err(TaskError::validation(
                "field",
                format!(
                    "'{}' is not an updatable field. Valid options are: title, description, due_date, priority, status",
                    s
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(id: &str, due: (i32, u32, u32), priority: Priority) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            priority,
            status: Status::Pending,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_priority_parse_is_exact() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert!("high".parse::<Priority>().is_err());
        assert!("Urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_status_display_round_trips_in_progress() {
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
    }

    #[test]
    fn test_priority_sort_key_is_by_severity() {
        let low = sample_task("a", (2026, 1, 1), Priority::Low);
        let high = sample_task("b", (2026, 1, 1), Priority::High);
        assert_eq!(SortKey::Priority.compare(&high, &low), Ordering::Less);
    }

    #[test]
    fn test_filter_due_date_matches_persisted_form() {
        let task = sample_task("a", (2026, 1, 5), Priority::Low);
        assert!(FilterCriterion::DueDate.matches(&task, "2026-01-05"));
        assert!(!FilterCriterion::DueDate.matches(&task, "2026-1-5"));
    }

    #[test]
    fn test_task_field_rejects_immutable_fields() {
        let err = "id".parse::<TaskField>().unwrap_err();
        assert!(err.is_validation());
        assert!("created_at".parse::<TaskField>().is_err());
    }

    #[test]
    fn test_task_update_apply_touches_only_given_fields() {
        let mut task = sample_task("a", (2026, 1, 5), Priority::Low);
        let update = TaskUpdate {
            priority: Some(Priority::High),
            ..Default::default()
        };
        update.apply(&mut task);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.title, "Task a");
        assert_eq!(task.status, Status::Pending);
    }

    #[test]
    fn test_task_toml_layout() {
        let task = sample_task("3f9c2a1b", (2026, 1, 10), Priority::High);
        let toml_str = toml::to_string(&task).unwrap();
        assert!(toml_str.contains("due_date = \"2026-01-10\""));
        assert!(toml_str.contains("priority = \"High\""));
        assert!(toml_str.contains("status = \"Pending\""));
        assert!(toml_str.contains("created_at = \"2026-01-01 09:00:00\""));

        let back: Task = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, task);
    }
}
