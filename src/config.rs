//! Store configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML config file,
//! then explicit overrides supplied by the command line (which clap fills from
//! flags or `TASK_TRACKER_*` environment variables).

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "task-tracker";

pub const DEFAULT_DATABASE: &str = "task_management";
pub const DEFAULT_COLLECTION: &str = "tasks";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Where the document store lives
///
/// The collection file is `<endpoint>/<database>/<collection>.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory of the store
    pub endpoint: PathBuf,
    /// Logical database name (a subdirectory of the endpoint)
    pub database: String,
    /// Collection name (the document file stem)
    pub collection: String,
    /// Commit each write to git and push on close
    pub sync_git: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            sync_git: false,
        }
    }
}

impl StoreConfig {
    /// Store rooted at `endpoint` with default database and collection names
    pub fn at(endpoint: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn database_dir(&self) -> PathBuf {
        self.endpoint.join(&self.database)
    }

    pub fn collection_path(&self) -> PathBuf {
        self.database_dir().join(format!("{}.toml", self.collection))
    }
}

/// Values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct StoreOverrides {
    pub endpoint: Option<PathBuf>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub sync_git: bool,
}

impl StoreOverrides {
    pub fn apply(self, store: &mut StoreConfig) {
        if let Some(endpoint) = self.endpoint {
            store.endpoint = endpoint;
        }
        if let Some(database) = self.database {
            store.database = database;
        }
        if let Some(collection) = self.collection {
            store.collection = collection;
        }
        if self.sync_git {
            store.sync_git = true;
        }
    }
}

fn default_endpoint() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".task-tracker"))
}

/// Default location of the config file, if the platform has a config directory
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Parse a config file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve the effective configuration
///
/// An explicitly given config file must exist. The default config file is read
/// only when present.
pub fn load_config(explicit: Option<&Path>, overrides: StoreOverrides) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match default_config_file() {
            Some(path) if path.exists() => load_config_file(&path)?,
            _ => Config::default(),
        },
    };
    overrides.apply(&mut config.store);
    Ok(config)
}
