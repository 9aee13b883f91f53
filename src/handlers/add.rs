//! Add handler

use crate::TaskService;
use crate::error::{Result, TaskError};
use crate::task::Task;
use crate::validation;
use tracing::{info, warn};
use uuid::Uuid;

/// Attempts at finding an unused id before giving up
const MAX_ID_ATTEMPTS: usize = 8;

/// Generate a short task id: the first 8 hex digits of a v4 UUID
pub fn generate_task_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

impl TaskService {
    /// Create a new `Pending` task
    ///
    /// Fails with a validation error naming `title`, `due_date`, or `priority`
    /// when that input is rejected; nothing is stored in that case.
    pub fn add(
        &self,
        title: &str,
        description: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Task> {
        validation::validate_title(title)?;
        let due_date = validation::parse_due_date(due_date)?;
        let priority = validation::parse_priority(priority)?;

        // Uniqueness is enforced by the store; retry on the rare collision
        let mut last_err = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let task = Task::new(generate_task_id(), title, description, due_date, priority);
            match self.storage.insert(task.clone()) {
                Ok(()) => {
                    info!(id = %task.id, "task added");
                    return Ok(task);
                }
                Err(TaskError::DuplicateKey(id)) => {
                    warn!(%id, "generated task id collided, retrying");
                    last_err = Some(TaskError::DuplicateKey(id));
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| TaskError::storage("could not allocate a task id")))
    }
}
