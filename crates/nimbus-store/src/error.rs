//! Error types for nimbus-store.

use std::path::PathBuf;

/// Result type for nimbus-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nimbus-store.
///
/// These never escape the [`PreferenceStore`](crate::PreferenceStore)
/// convenience methods; they surface only through `try_get`/`try_set`,
/// the backends, and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage substrate cannot be reached (disabled, private mode, no window).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the storage capacity.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded {
        key: String,
        needed: u64,
        limit: u64,
    },

    /// Database error from SQLite.
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create the database or config directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The config file is not valid TOML for [`Config`](crate::Config).
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a favorite was not added.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddFavoriteError {
    /// A favorite with the same name (ignoring case) already exists.
    #[error("{name} is already in your favorites")]
    AlreadyExists { name: String },

    /// The updated collection could not be written to storage.
    #[error("Could not save {name} to favorites")]
    NotSaved { name: String },
}
