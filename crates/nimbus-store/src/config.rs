//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::backend::{DEFAULT_QUOTA_BYTES, MemoryBackend, StorageBackend};
use crate::error::{Error, Result};

/// Which storage substrate native hosts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Persistent SQLite database.
    #[default]
    Sqlite,
    /// Process-local map, lost on exit.
    Memory,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage substrate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Substrate to open.
    #[serde(default)]
    pub backend: BackendKind,

    /// Database path. Defaults to [`default_db_path`](crate::default_db_path).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Capacity in bytes; writes beyond it fail like a full `localStorage`.
    #[serde(default = "default_quota")]
    pub quota_bytes: u64,
}

fn default_quota() -> u64 {
    DEFAULT_QUOTA_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: None,
            quota_bytes: default_quota(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `"info"` or
    /// `"nimbus_store=debug"`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Get the config file path.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nimbus")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Open the configured storage backend.
    pub fn open_backend(&self) -> Result<Box<dyn StorageBackend>> {
        match self.storage.backend {
            BackendKind::Memory => Ok(Box::new(MemoryBackend::with_quota(
                self.storage.quota_bytes,
            ))),
            #[cfg(feature = "sqlite")]
            BackendKind::Sqlite => {
                let path = self
                    .storage
                    .path
                    .clone()
                    .unwrap_or_else(crate::default_db_path);
                Ok(Box::new(
                    crate::SqliteBackend::open(path)?.with_quota(self.storage.quota_bytes),
                ))
            }
            #[cfg(not(feature = "sqlite"))]
            BackendKind::Sqlite => Err(Error::Unavailable(
                "built without the sqlite feature".to_string(),
            )),
        }
    }
}
