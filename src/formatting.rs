//! Formatting helper functions
//!
//! Renders tasks as text for the command-line shell.

use crate::task::{TIMESTAMP_FORMAT, Task};

const TITLE_WIDTH: usize = 24;

/// Shorten a title to fit the table column, counting characters rather than bytes
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        title.to_string()
    } else {
        let mut short: String = title.chars().take(TITLE_WIDTH - 1).collect();
        short.push('…');
        short
    }
}

/// Format tasks as a table with one row per task and a total line
pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!(
        "{:<10} {:<25} {:<12} {:<10} {:<15}\n",
        "ID", "Title", "Due Date", "Priority", "Status"
    );
    result.push_str(&"-".repeat(80));
    result.push('\n');

    for task in tasks {
        result.push_str(&format!(
            "{:<10} {:<25} {:<12} {:<10} {:<15}\n",
            task.id,
            truncate_title(&task.title),
            task.due_date_string(),
            task.priority,
            task.status
        ));
    }

    result.push_str(&format!("\nTotal tasks: {}", tasks.len()));
    result
}

/// Format every field of one task
pub fn format_task_detail(task: &Task) -> String {
    let mut result = format!("[{}] {}\n", task.id, task.title);
    if !task.description.is_empty() {
        result.push_str(&format!("  Description: {}\n", task.description));
    }
    result.push_str(&format!("  Due date: {}\n", task.due_date_string()));
    result.push_str(&format!("  Priority: {}\n", task.priority));
    result.push_str(&format!("  Status: {}\n", task.status));
    result.push_str(&format!(
        "  Created: {}",
        task.created_at.format(TIMESTAMP_FORMAT)
    ));
    result
}

/// One-line summary used in confirmations
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} | Due: {} | Priority: {} | Status: {}",
        task.id,
        task.title,
        task.due_date_string(),
        task.priority,
        task.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};
    use chrono::NaiveDate;

    fn task(title: &str) -> Task {
        Task {
            id: "3f9c2a1b".to_string(),
            title: title.to_string(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            priority: Priority::High,
            status: Status::InProgress,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_task_table(&[]), "No tasks found");
    }

    #[test]
    fn test_table_row_and_total() {
        let table = format_task_table(&[task("Write report")]);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("3f9c2a1b"));
        assert!(row.contains("Write report"));
        assert!(row.contains("2026-01-10"));
        assert!(row.contains("In Progress"));
        assert!(table.ends_with("Total tasks: 1"));
    }

    #[test]
    fn test_long_title_is_truncated_on_char_boundary() {
        let title = "é".repeat(40);
        let table = format_task_table(&[task(&title)]);
        assert!(table.contains('…'));
        assert!(!table.contains(&title));
    }

    #[test]
    fn test_detail_omits_empty_description() {
        let detail = format_task_detail(&task("Write report"));
        assert!(!detail.contains("Description"));
        assert!(detail.contains("Created: 2026-01-01 09:30:00"));
    }

    #[test]
    fn test_task_line() {
        assert_eq!(
            format_task_line(&task("Write report")),
            "[3f9c2a1b] Write report | Due: 2026-01-10 | Priority: High | Status: In Progress"
        );
    }
}
