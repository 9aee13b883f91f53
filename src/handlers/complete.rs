//! Complete handler

use crate::TaskService;
use crate::error::Result;
use crate::task::{Status, Task, TaskUpdate};
use crate::validation;
use tracing::{debug, info};

impl TaskService {
    /// Mark a task as completed
    ///
    /// Completing an already completed task succeeds without writing.
    pub fn complete(&self, id: &str) -> Result<Task> {
        let id = validation::normalize_task_id(id);
        let task = self.storage.find_by_id(&id)?;
        if task.is_completed() {
            debug!(%id, "task already completed");
            return Ok(task);
        }

        let task = self
            .storage
            .update(&id, &TaskUpdate::status(Status::Completed))?;
        info!(%id, "task completed");
        Ok(task)
    }
}
