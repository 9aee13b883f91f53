//! Update handler

use crate::TaskService;
use crate::error::{Result, TaskError};
use crate::task::{Task, TaskField, TaskUpdate};
use crate::validation;
use tracing::info;

impl TaskService {
    /// Change a single field, given by name, to a new value
    ///
    /// The value is validated with the same rules as `add`. Status may be set to
    /// any of its values; no workflow order is enforced.
    pub fn update(&self, id: &str, field: &str, value: &str) -> Result<Task> {
        let field: TaskField = field.parse()?;
        let mut update = TaskUpdate::default();
        match field {
            TaskField::Title => {
                validation::validate_title(value)?;
                update.title = Some(value.to_string());
            }
            TaskField::Description => update.description = Some(value.to_string()),
            TaskField::DueDate => update.due_date = Some(validation::parse_due_date(value)?),
            TaskField::Priority => update.priority = Some(validation::parse_priority(value)?),
            TaskField::Status => update.status = Some(validation::parse_status(value)?),
        }
        self.update_fields(id, update)
    }

    /// Apply several field changes at once
    pub fn update_fields(&self, id: &str, update: TaskUpdate) -> Result<Task> {
        if update.is_empty() {
            return Err(TaskError::validation("update", "No fields to update"));
        }
        if let Some(ref title) = update.title {
            validation::validate_title(title)?;
        }

        let id = validation::normalize_task_id(id);
        let task = self.storage.update(&id, &update)?;
        info!(%id, "task updated");
        Ok(task)
    }
}
