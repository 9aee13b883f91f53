//! In-memory form of one collection document
//!
//! A collection file holds a format version and an ordered array of task
//! documents. Tasks keep insertion order in a `Vec`, which doubles as the
//! storage order reported by `find_all`. A `HashSet` of ids backs the unique key
//! constraint; it is not serialized and is rebuilt on load.

use crate::error::{Result, TaskError};
use crate::task::{Task, TaskUpdate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Current collection file format
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct TaskCollection {
    pub format_version: u32,
    pub(crate) tasks: Vec<Task>,
    pub(crate) ids: HashSet<String>,
}

impl Default for TaskCollection {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tasks: Vec::new(),
            ids: HashSet::new(),
        }
    }
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// All tasks in storage order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task, rejecting an id that is already present
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.ids.contains(&task.id) {
            return Err(TaskError::DuplicateKey(task.id));
        }
        self.ids.insert(task.id.clone());
        self.tasks.push(task);
        Ok(())
    }

    /// Apply a partial update in place, keeping the task's storage position
    pub fn update(&mut self, id: &str, update: &TaskUpdate) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        update.apply(task);
        Ok(task.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        self.ids.remove(id);
        Ok(self.tasks.remove(pos))
    }
}

#[derive(Deserialize)]
struct CollectionHelper {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct CollectionRef<'a> {
    format_version: u32,
    tasks: &'a [Task],
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl<'de> Deserialize<'de> for TaskCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let helper = CollectionHelper::deserialize(deserializer)?;
        if helper.format_version > FORMAT_VERSION {
            return Err(D::Error::custom(format!(
                "unsupported format_version {} (newest supported is {})",
                helper.format_version, FORMAT_VERSION
            )));
        }

        let mut ids = HashSet::with_capacity(helper.tasks.len());
        for task in &helper.tasks {
            if !ids.insert(task.id.clone()) {
                return Err(D::Error::custom(format!(
                    "duplicate task id '{}' in collection",
                    task.id
                )));
            }
        }

        Ok(TaskCollection {
            format_version: FORMAT_VERSION,
            tasks: helper.tasks,
            ids,
        })
    }
}

impl Serialize for TaskCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CollectionRef {
            format_version: self.format_version,
            tasks: &self.tasks,
        }
        .serialize(serializer)
    }
}
