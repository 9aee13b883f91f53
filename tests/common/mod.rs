//! Common test utilities for integration tests

#![allow(dead_code)]

use task_tracker::{Storage, StoreConfig, Task, TaskService};
use tempfile::TempDir;

/// Create a test service over a temporary store
pub fn get_test_service() -> (TaskService, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::connect(StoreConfig::at(temp_dir.path())).unwrap();
    (TaskService::new(storage), temp_dir)
}

/// Add a task with an empty description
pub fn add_task(service: &TaskService, title: &str, due_date: &str, priority: &str) -> Task {
    service.add(title, "", due_date, priority).unwrap()
}

/// Titles of tasks, in order
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}
