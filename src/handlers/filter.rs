//! Filter handler

use crate::TaskService;
use crate::error::Result;
use crate::task::{FilterCriterion, Task};

/// Keep only the tasks whose `criterion` field equals `value`
pub fn apply_filter(tasks: &mut Vec<Task>, criterion: FilterCriterion, value: &str) {
    tasks.retain(|task| criterion.matches(task, value));
}

impl TaskService {
    /// Tasks whose `priority`, `status`, or `due_date` equals `value` exactly
    ///
    /// The comparison is against the stored text (`High`, `In Progress`,
    /// `2026-01-05`). Storage order is kept; no match is an empty list.
    pub fn filter(&self, criterion: &str, value: &str) -> Result<Vec<Task>> {
        let criterion: FilterCriterion = criterion.parse()?;
        let mut tasks = self.storage.find_all()?;
        apply_filter(&mut tasks, criterion, value);
        Ok(tasks)
    }
}
