//! Storage gateway over a single collection document
//!
//! Every call re-reads the collection file and every mutation rewrites it before
//! returning, so the file on disk is always the source of truth. Writes go to a
//! sibling temporary file that is renamed over the collection, which makes each
//! single-document write atomic.

use crate::collection::TaskCollection;
use crate::config::StoreConfig;
use crate::error::{Result, TaskError};
use crate::git_ops::GitOps;
use crate::task::{Task, TaskUpdate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Storage {
    config: StoreConfig,
    file_path: PathBuf,
    git: Option<GitOps>,
    closed: bool,
}

impl Storage {
    /// Open the store described by `config`
    ///
    /// Creates the database directory if needed and reads the collection once so
    /// that an unreadable or malformed store is reported at startup rather than on
    /// the first command.
    pub fn connect(config: StoreConfig) -> Result<Self> {
        let database_dir = config.database_dir();
        fs::create_dir_all(&database_dir).map_err(|e| {
            TaskError::storage(format!(
                "cannot create database directory {}: {}",
                database_dir.display(),
                e
            ))
        })?;

        let file_path = config.collection_path();
        let git = if config.sync_git {
            let ops = GitOps::new(&file_path);
            if !ops.is_git_managed() {
                warn!(
                    path = %file_path.display(),
                    "git sync requested but the store is not inside a git repository"
                );
            }
            Some(ops)
        } else {
            None
        };

        // A store that fails to load was never opened and has nothing to release
        let collection = Self::read_collection(&file_path)?;
        info!(
            path = %file_path.display(),
            tasks = collection.len(),
            "connected to task store"
        );
        Ok(Self {
            config,
            file_path,
            git,
            closed: false,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the collection document
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<TaskCollection> {
        Self::read_collection(&self.file_path)
    }

    fn read_collection(file_path: &Path) -> Result<TaskCollection> {
        if !file_path.exists() {
            return Ok(TaskCollection::new());
        }

        let content = fs::read_to_string(file_path).map_err(|e| {
            TaskError::storage(format!("cannot read {}: {}", file_path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            TaskError::storage(format!(
                "malformed collection {}: {}",
                file_path.display(),
                e
            ))
        })
    }

    fn save(&self, collection: &TaskCollection, message: &str) -> Result<()> {
        let content = toml::to_string_pretty(collection)
            .map_err(|e| TaskError::storage(format!("cannot encode collection: {}", e)))?;

        let tmp_path = self.file_path.with_extension("toml.tmp");
        let written =
            fs::write(&tmp_path, content).and_then(|_| fs::rename(&tmp_path, &self.file_path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                debug!(path = %tmp_path.display(), error = %cleanup, "temporary file not removed");
            }
            return Err(TaskError::storage(format!(
                "cannot write {}: {}",
                self.file_path.display(),
                e
            )));
        }
        debug!(path = %self.file_path.display(), "{}", message);

        if let Some(ref git) = self.git
            && let Err(e) = git.commit(&self.file_path, message)
        {
            warn!(error = %e, "git commit failed; the write itself succeeded");
        }
        Ok(())
    }

    /// Persist a new task; fails with `DuplicateKey` if its id is taken
    pub fn insert(&self, task: Task) -> Result<()> {
        let mut collection = self.load()?;
        let message = commit_message("Add", &task);
        collection.insert(task)?;
        self.save(&collection, &message)
    }

    /// All tasks in storage order
    pub fn find_all(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.tasks)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Task> {
        self.load()?
            .find(id)
            .cloned()
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Apply a partial update and return the updated task
    pub fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task> {
        let mut collection = self.load()?;
        let task = collection.update(id, update)?;
        self.save(&collection, &commit_message("Update", &task))?;
        Ok(task)
    }

    /// Remove a task and return it
    pub fn delete(&self, id: &str) -> Result<Task> {
        let mut collection = self.load()?;
        let task = collection.remove(id)?;
        self.save(&collection, &commit_message("Delete", &task))?;
        Ok(task)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Release the store, pushing git history when sync is enabled
    ///
    /// A failed push is logged; it never fails the close.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.shutdown();
        Ok(())
    }

    fn shutdown(&self) {
        if let Some(ref git) = self.git
            && git.is_git_managed()
        {
            match git.push() {
                Ok(true) => {}
                Ok(false) => debug!("no 'origin' remote or no commits; push skipped"),
                Err(e) => warn!("git push failed, history stays local: {:#}", e),
            }
        }
        debug!(path = %self.file_path.display(), "task store closed");
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        if !self.closed {
            self.shutdown();
        }
    }
}

/// Commit message for a write touching `task`, e.g. `Add task 3f9c2a1b: Write report`
fn commit_message(action: &str, task: &Task) -> String {
    format!("{} task {}: {}", action, task.id, task.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open_store() -> (Storage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::connect(StoreConfig::at(dir.path())).unwrap();
        (storage, dir)
    }

    fn task(id: &str) -> Task {
        Task::new(
            id,
            format!("Task {}", id),
            "",
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            Priority::Low,
        )
    }

    #[test]
    fn test_connect_creates_database_dir_without_collection_file() {
        let (storage, dir) = open_store();
        assert!(dir.path().join("task_management").is_dir());
        assert!(!storage.file_path().exists());
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_persists_to_collection_file() {
        let (storage, _dir) = open_store();
        storage.insert(task("a1")).unwrap();

        let content = fs::read_to_string(storage.file_path()).unwrap();
        assert!(content.contains("[[tasks]]"));
        assert!(content.contains("id = \"a1\""));
        assert!(!storage.file_path().with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_insert_duplicate_key() {
        let (storage, _dir) = open_store();
        storage.insert(task("a1")).unwrap();
        let err = storage.insert(task("a1")).unwrap_err();
        assert!(matches!(err, TaskError::DuplicateKey(_)));
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_reads_see_writes_from_another_handle() {
        let (storage, dir) = open_store();
        let other = Storage::connect(StoreConfig::at(dir.path())).unwrap();

        storage.insert(task("a1")).unwrap();
        assert_eq!(other.find_by_id("a1").unwrap().title, "Task a1");
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let (storage, _dir) = open_store();
        let update = TaskUpdate::status(Status::Completed);
        assert!(storage.update("missing", &update).unwrap_err().is_not_found());
        assert!(storage.delete("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_malformed_collection_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = StoreConfig::at(dir.path());
        fs::create_dir_all(store.database_dir()).unwrap();
        fs::write(store.collection_path(), "tasks = \"not an array\"").unwrap();

        let err = Storage::connect(store).err().unwrap();
        assert!(matches!(err, TaskError::StorageUnavailable(_)));
    }

    #[test]
    fn test_separate_collections_are_isolated() {
        let dir = TempDir::new().unwrap();
        let work = Storage::connect(StoreConfig {
            collection: "work".to_string(),
            ..StoreConfig::at(dir.path())
        })
        .unwrap();
        let home = Storage::connect(StoreConfig {
            collection: "home".to_string(),
            ..StoreConfig::at(dir.path())
        })
        .unwrap();

        work.insert(task("w1")).unwrap();
        assert_eq!(work.count().unwrap(), 1);
        assert_eq!(home.count().unwrap(), 0);
    }

    #[test]
    fn test_close_without_git() {
        let (storage, _dir) = open_store();
        storage.close().unwrap();
    }

    #[test]
    fn test_failed_write_removes_temporary_file() {
        let (storage, _dir) = open_store();
        // A directory in the collection's place makes the final rename fail
        fs::create_dir_all(storage.file_path().join("occupied")).unwrap();

        let err = storage
            .save(&TaskCollection::new(), "Add task a1: Task a1")
            .unwrap_err();
        assert!(matches!(err, TaskError::StorageUnavailable(_)));
        assert!(!storage.file_path().with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_commit_message_names_task() {
        assert_eq!(commit_message("Add", &task("a1")), "Add task a1: Task a1");
    }
}
