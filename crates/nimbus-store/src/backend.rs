//! Storage substrate abstraction.
//!
//! [`StorageBackend`] is the string key/value contract the preference store
//! is written against. It mirrors the browser `localStorage` API: synchronous,
//! string keys and values, capacity-bounded writes.
//!
//! Implementations in this crate:
//!
//! - [`MemoryBackend`]: in-process map with optional quota and failure
//!   injection, for tests and ephemeral sessions
//! - [`SqliteBackend`](crate::SqliteBackend): persistent native storage
//!   (feature `sqlite`)

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Default capacity, matching the common browser `localStorage` limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// A synchronous string key/value store.
///
/// Backends take `&self` for writes and use interior mutability, the same
/// way the browser storage object does. They are not expected to be shared
/// across threads.
pub trait StorageBackend {
    /// Fetch the raw value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// Check that writing `key = value` fits in `limit` bytes, given `used` bytes
/// already taken by every other entry.
///
/// Sizes count the UTF-8 bytes of both key and value.
pub(crate) fn check_quota(key: &str, value: &str, used: u64, limit: u64) -> Result<()> {
    let needed = used + (key.len() + value.len()) as u64;
    if needed > limit {
        return Err(Error::QuotaExceeded {
            key: key.to_string(),
            needed,
            limit,
        });
    }
    Ok(())
}

/// In-memory storage backend.
///
/// # Features
///
/// - **Quota**: writes that would exceed the configured capacity fail with
///   [`Error::QuotaExceeded`]
/// - **Failure injection**: [`set_available(false)`](Self::set_available)
///   makes every operation fail with [`Error::Unavailable`], like a browser
///   with storage disabled
///
/// # Example
///
/// ```
/// use nimbus_store::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::with_quota(16);
/// backend.set_item("k", "small").unwrap();
/// assert!(backend.set_item("k", "this value is far too large").is_err());
/// assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("small"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
    quota: Option<u64>,
    unavailable: Cell<bool>,
}

impl MemoryBackend {
    /// Create an empty backend without a capacity limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend limited to `quota` bytes.
    pub fn with_quota(quota: u64) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Toggle availability. While unavailable every operation fails.
    pub fn set_available(&self, available: bool) {
        self.unavailable.set(!available);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.get() {
            return Err(Error::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_available()?;

        if let Some(limit) = self.quota {
            let used: u64 = self
                .items
                .borrow()
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.len() + v.len()) as u64)
                .sum();
            check_quota(key, value, used, limit)?;
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.ensure_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
