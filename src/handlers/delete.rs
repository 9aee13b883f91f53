//! Delete handler

use crate::TaskService;
use crate::error::Result;
use crate::task::Task;
use crate::validation;
use tracing::info;

impl TaskService {
    /// Permanently remove a task, returning what was removed
    pub fn delete(&self, id: &str) -> Result<Task> {
        let id = validation::normalize_task_id(id);
        let task = self.storage.delete(&id)?;
        info!(%id, "task deleted");
        Ok(task)
    }
}
