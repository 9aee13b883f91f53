//! Task Tracker Library
//!
//! A single-user task tracker that persists tasks to a file-based document
//! store. Tasks are flat records (title, description, due date, priority,
//! status, creation time) that can be added, listed and sorted, updated,
//! completed, deleted, and filtered.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Service Layer**: `TaskService` - Validates input and orchestrates operations
//! - **Domain Layer**: `task` module - The `Task` record and its closed enumerations
//! - **Persistence Layer**: `storage` module - TOML collection documents with optional Git sync
//!
//! # Example
//!
//! ```no_run
//! use task_tracker::{Storage, StoreConfig, TaskService};
//!
//! # fn main() -> task_tracker::Result<()> {
//! let storage = Storage::connect(StoreConfig::at("./store"))?;
//! let service = TaskService::new(storage);
//! let task = service.add("Write report", "", "2026-01-10", "High")?;
//! service.complete(&task.id)?;
//! service.close()?;
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod formatting;
mod git_ops;
mod handlers;
pub mod shell;
pub mod storage;
pub mod task;
pub mod validation;

pub use config::{Config, StoreConfig};
pub use error::{Result, TaskError};
pub use git_ops::GitOps;
pub use handlers::list::sort_tasks;
pub use shell::{Shell, TaskCommand};
pub use storage::Storage;
pub use task::{FilterCriterion, Priority, SortKey, Status, Task, TaskField, TaskUpdate};

/// Task operations over a storage gateway
///
/// The service owns the gateway for its whole lifetime. Call [`TaskService::close`]
/// at shutdown to release the store explicitly; dropping the service releases it
/// as well, logging any failure.
pub struct TaskService {
    pub(crate) storage: Storage,
}

impl TaskService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Borrow the underlying gateway
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Release the store
    pub fn close(self) -> Result<()> {
        self.storage.close()
    }
}
