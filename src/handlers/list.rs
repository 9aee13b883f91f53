//! List handler

use crate::TaskService;
use crate::error::Result;
use crate::task::{SortKey, Task};
use crate::validation;

/// Stable sort of `tasks` by `key`
///
/// Priority sorts High, Medium, Low; dates and timestamps sort oldest first.
/// `reverse` flips the order while still keeping equal tasks in their original
/// relative order.
pub fn sort_tasks(mut tasks: Vec<Task>, key: SortKey, reverse: bool) -> Vec<Task> {
    if reverse {
        tasks.sort_by(|a, b| key.compare(b, a));
    } else {
        tasks.sort_by(|a, b| key.compare(a, b));
    }
    tasks
}

impl TaskService {
    /// All tasks, in storage order or sorted by the named key
    /// (`due_date`, `priority`, or `created_at`)
    pub fn list(&self, sort_key: Option<&str>) -> Result<Vec<Task>> {
        match sort_key {
            Some(key) => self.list_sorted(key.parse()?, false),
            None => self.storage.find_all(),
        }
    }

    pub fn list_sorted(&self, key: SortKey, reverse: bool) -> Result<Vec<Task>> {
        let tasks = self.storage.find_all()?;
        Ok(sort_tasks(tasks, key, reverse))
    }

    /// Look up one task
    pub fn get(&self, id: &str) -> Result<Task> {
        self.storage.find_by_id(&validation::normalize_task_id(id))
    }
}
