//! Preference persistence for the Nimbus weather dashboard.
//!
//! This crate provides a typed facade over a string key/value storage
//! substrate (browser `localStorage`, SQLite, or memory) managing four
//! preference collections under fixed keys.
//!
//! # Features
//!
//! - Search history: most recent first, case-insensitively unique, at most 10
//! - Favorite locations, unique by case-insensitive name
//! - Theme and temperature unit preferences with defaults
//! - Storage usage statistics
//! - Snapshot export/import
//!
//! Read failures fall back to defaults and write failures return `false`;
//! both are reported through `tracing`.
//!
//! # Example
//!
//! ```
//! use nimbus_store::{MemoryBackend, PreferenceStore};
//! use nimbus_types::Theme;
//!
//! let store = PreferenceStore::new(MemoryBackend::new());
//!
//! store.add_search_term("Paris");
//! let history = store.add_search_term("paris");
//! assert_eq!(history, vec!["paris"]);
//!
//! assert_eq!(store.theme(), Theme::Light);
//! store.set_theme(Theme::Dark);
//! assert_eq!(store.theme(), Theme::Dark);
//! ```

mod backend;
mod config;
mod error;
mod keys;
mod models;
#[cfg(feature = "sqlite")]
mod schema;
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;

pub use backend::{DEFAULT_QUOTA_BYTES, MemoryBackend, StorageBackend};
pub use config::{BackendKind, Config, LoggingConfig, StorageConfig};
pub use error::{AddFavoriteError, Error, Result};
pub use keys::PreferenceKey;
pub use models::{ImportResult, KeyUsage, PreferencesSnapshot, UsageStats};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteBackend;
pub use store::{MAX_SEARCH_HISTORY, PreferenceStore};

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/nimbus/preferences.db`
/// - macOS: `~/Library/Application Support/nimbus/preferences.db`
/// - Windows: `C:\Users\<user>\AppData\Local\nimbus\preferences.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("nimbus")
        .join("preferences.db")
}
