//! Main preference store implementation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use nimbus_types::{FavoriteLocation, NewFavorite, TemperatureUnit, Theme, names_match};

use crate::backend::StorageBackend;
use crate::error::{AddFavoriteError, Result};
use crate::keys::PreferenceKey;
use crate::models::{ImportResult, PreferencesSnapshot, UsageStats};

/// Maximum number of search history entries kept.
pub const MAX_SEARCH_HISTORY: usize = 10;

/// Typed preference storage over a [`StorageBackend`].
///
/// Values are stored as JSON text under the fixed [`PreferenceKey`] keys.
/// The convenience methods never fail: read problems fall back to defaults,
/// write problems are reported as `false` (or a failure result) and logged.
/// Use [`try_get`](Self::try_get) and [`try_set`](Self::try_set) to see the
/// underlying [`Error`](crate::Error).
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: StorageBackend> PreferenceStore<B> {
    /// Wrap a storage backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the underlying backend.
    pub fn into_inner(self) -> B {
        self.backend
    }

    // === Generic access ===

    /// Read and parse the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn try_get<T: DeserializeOwned>(&self, key: PreferenceKey) -> Result<Option<T>> {
        match self.backend.get_item(key.storage_key())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read the value under `key`, or `default` if it is missing or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: PreferenceKey, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("{} not set, using default", key.storage_key());
                default
            }
            Err(e) => {
                warn!("Failed to read {}: {}", key.storage_key(), e);
                default
            }
        }
    }

    /// Serialize `value` and write it under `key`.
    pub fn try_set<T: Serialize + ?Sized>(&self, key: PreferenceKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key.storage_key(), &raw)
    }

    /// Write `value` under `key`. Returns `false` (and logs) on failure.
    pub fn set<T: Serialize + ?Sized>(&self, key: PreferenceKey, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to write {}: {}", key.storage_key(), e);
                false
            }
        }
    }

    /// Remove `key`. Returns `false` (and logs) on failure.
    fn remove(&self, key: PreferenceKey) -> bool {
        match self.backend.remove_item(key.storage_key()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to remove {}: {}", key.storage_key(), e);
                false
            }
        }
    }
}

// Search history operations
impl<B: StorageBackend> PreferenceStore<B> {
    /// Recently searched cities, most recent first.
    pub fn search_history(&self) -> Vec<String> {
        self.get(PreferenceKey::SearchHistory, Vec::new())
    }

    /// Record a search for `city`.
    ///
    /// Any earlier entry for the same city (ignoring case) is replaced by this
    /// one at the front, and the history is cut to [`MAX_SEARCH_HISTORY`]
    /// entries. Blank input leaves the history untouched.
    ///
    /// Returns the updated history, even if it could not be persisted.
    pub fn add_search_term(&self, city: &str) -> Vec<String> {
        let mut history = self.search_history();

        if city.trim().is_empty() {
            return history;
        }

        push_front_unique(&mut history, city);
        self.set(PreferenceKey::SearchHistory, &history);
        history
    }

    /// Forget all searched cities.
    pub fn clear_search_history(&self) -> bool {
        self.set(PreferenceKey::SearchHistory, &Vec::<String>::new())
    }
}

// Favorite operations
impl<B: StorageBackend> PreferenceStore<B> {
    /// Favorite locations in the order they were added.
    pub fn favorites(&self) -> Vec<FavoriteLocation> {
        self.get(PreferenceKey::Favorites, Vec::new())
    }

    /// Add a favorite stamped with the current time.
    ///
    /// Fails without touching storage if a favorite with the same name
    /// (ignoring case) already exists.
    pub fn add_favorite(
        &self,
        location: NewFavorite,
    ) -> std::result::Result<Vec<FavoriteLocation>, AddFavoriteError> {
        self.add_favorite_at(location, OffsetDateTime::now_utc())
    }

    /// Add a favorite stamped with `added_at`.
    pub fn add_favorite_at(
        &self,
        location: NewFavorite,
        added_at: OffsetDateTime,
    ) -> std::result::Result<Vec<FavoriteLocation>, AddFavoriteError> {
        let mut favorites = self.favorites();

        if favorites.iter().any(|f| f.matches(&location.name)) {
            return Err(AddFavoriteError::AlreadyExists {
                name: location.name,
            });
        }

        let name = location.name.clone();
        favorites.push(location.added_at(added_at));

        if !self.set(PreferenceKey::Favorites, &favorites) {
            return Err(AddFavoriteError::NotSaved { name });
        }

        info!("Added {} to favorites", name);
        Ok(favorites)
    }

    /// Remove every favorite called `name` (ignoring case).
    ///
    /// Removing a name that is not a favorite is a no-op. Returns the
    /// updated collection.
    pub fn remove_favorite(&self, name: &str) -> Vec<FavoriteLocation> {
        let mut favorites = self.favorites();
        let before = favorites.len();
        favorites.retain(|f| !f.matches(name));

        if favorites.len() != before {
            debug!("Removed {} favorite(s) named {}", before - favorites.len(), name);
        }

        self.set(PreferenceKey::Favorites, &favorites);
        favorites
    }

    /// Whether `name` is a favorite (ignoring case).
    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites().iter().any(|f| f.matches(name))
    }
}

// Display preference operations
impl<B: StorageBackend> PreferenceStore<B> {
    /// The stored theme, [`Theme::Light`] if unset or not a known theme.
    pub fn theme(&self) -> Theme {
        self.get(PreferenceKey::Theme, Theme::default())
    }

    /// Store the theme.
    pub fn set_theme(&self, theme: Theme) -> bool {
        self.set(PreferenceKey::Theme, &theme)
    }

    /// The stored unit, [`TemperatureUnit::Celsius`] if unset or not a known unit.
    pub fn unit(&self) -> TemperatureUnit {
        self.get(PreferenceKey::Unit, TemperatureUnit::default())
    }

    /// Store the temperature unit.
    pub fn set_unit(&self, unit: TemperatureUnit) -> bool {
        self.set(PreferenceKey::Unit, &unit)
    }
}

// Whole-store operations
impl<B: StorageBackend> PreferenceStore<B> {
    /// Remove every preference key.
    ///
    /// All four keys are attempted even if some removals fail.
    pub fn clear_all(&self) {
        let removed = PreferenceKey::ALL
            .iter()
            .filter(|key| self.remove(**key))
            .count();
        info!("Cleared {} of {} preference keys", removed, PreferenceKey::ALL.len());
    }

    /// Bytes used by each key's raw stored value, plus the total.
    pub fn usage_stats(&self) -> UsageStats {
        UsageStats::from_sizes(PreferenceKey::ALL.map(|key| {
            let bytes = match self.backend.get_item(key.storage_key()) {
                Ok(raw) => raw.map_or(0, |r| r.len() as u64),
                Err(e) => {
                    warn!("Failed to measure {}: {}", key.storage_key(), e);
                    0
                }
            };
            (key, bytes)
        }))
    }

    /// Read every preference.
    pub fn export_snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            search_history: self.search_history(),
            favorites: self.favorites(),
            theme: self.theme(),
            unit: self.unit(),
        }
    }

    /// Replace every preference with the contents of `snapshot`.
    ///
    /// History is de-duplicated (first occurrence wins), stripped of blank
    /// entries and cut to [`MAX_SEARCH_HISTORY`]. Favorites with a name
    /// already seen earlier in the snapshot are skipped.
    pub fn import_snapshot(&self, snapshot: PreferencesSnapshot) -> ImportResult {
        let history = dedupe_keep_first(&snapshot.search_history);

        let mut favorites: Vec<FavoriteLocation> = Vec::with_capacity(snapshot.favorites.len());
        let mut skipped = 0;
        for favorite in snapshot.favorites {
            if favorites.iter().any(|f| f.matches(&favorite.name)) {
                skipped += 1;
            } else {
                favorites.push(favorite);
            }
        }

        let saved = [
            self.set(PreferenceKey::SearchHistory, &history),
            self.set(PreferenceKey::Favorites, &favorites),
            self.set_theme(snapshot.theme),
            self.set_unit(snapshot.unit),
        ]
        .iter()
        .all(|ok| *ok);

        info!(
            "Imported {} history entries and {} favorites ({} skipped)",
            history.len(),
            favorites.len(),
            skipped
        );

        ImportResult {
            history_entries: history.len(),
            favorites_imported: favorites.len(),
            favorites_skipped: skipped,
            saved,
        }
    }
}

/// Move `city` to the front of `history`, dropping case-insensitive
/// duplicates and anything past [`MAX_SEARCH_HISTORY`].
fn push_front_unique(history: &mut Vec<String>, city: &str) {
    history.retain(|entry| !names_match(entry, city));
    history.insert(0, city.to_string());
    history.truncate(MAX_SEARCH_HISTORY);
}

fn dedupe_keep_first(entries: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for city in entries {
        if city.trim().is_empty() || kept.iter().any(|k| names_match(k, city)) {
            continue;
        }
        kept.push(city.clone());
        if kept.len() == MAX_SEARCH_HISTORY {
            break;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use time::macros::datetime;

    fn store() -> PreferenceStore<MemoryBackend> {
        PreferenceStore::new(MemoryBackend::new())
    }

    fn paris() -> NewFavorite {
        NewFavorite::new("Paris", "France", 48.8566, 2.3522)
    }

    // --- Generic get/set ---

    #[test]
    fn test_get_missing_returns_default() {
        let store = store();
        let value: Vec<String> = store.get(PreferenceKey::SearchHistory, vec!["x".to_string()]);
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_get_malformed_json_returns_default() {
        let store = store();
        store
            .backend()
            .set_item(PreferenceKey::SearchHistory.storage_key(), "[not json")
            .unwrap();

        assert!(store.search_history().is_empty());
        assert!(store.try_get::<Vec<String>>(PreferenceKey::SearchHistory).is_err());
    }

    #[test]
    fn test_set_failure_returns_false() {
        let store = store();
        store.backend().set_available(false);
        assert!(!store.set(PreferenceKey::Theme, &Theme::Dark));
        assert!(!store.set_theme(Theme::Dark));
    }

    #[test]
    fn test_values_are_stored_as_json() {
        let store = store();
        store.set_theme(Theme::Dark);
        let raw = store
            .backend()
            .get_item(PreferenceKey::Theme.storage_key())
            .unwrap();
        assert_eq!(raw.as_deref(), Some("\"dark\""));
    }

    // --- Search history ---

    #[test]
    fn test_add_search_term_prepends() {
        let store = store();
        store.add_search_term("London");
        let history = store.add_search_term("Berlin");
        assert_eq!(history, vec!["Berlin", "London"]);
        assert_eq!(store.search_history(), history);
    }

    #[test]
    fn test_add_search_term_case_insensitive_dedupe() {
        let store = store();
        store.add_search_term("london");
        store.add_search_term("Berlin");
        let history = store.add_search_term("LONDON");
        assert_eq!(history, vec!["LONDON", "Berlin"]);
    }

    #[test]
    fn test_search_history_evicts_oldest() {
        let store = store();
        for i in 0..=MAX_SEARCH_HISTORY {
            store.add_search_term(&format!("City {i}"));
        }
        let history = store.search_history();
        assert_eq!(history.len(), MAX_SEARCH_HISTORY);
        assert_eq!(history[0], "City 10");
        assert!(!history.contains(&"City 0".to_string()));
    }

    #[test]
    fn test_blank_search_term_ignored() {
        let store = store();
        store.add_search_term("Oslo");
        assert_eq!(store.add_search_term("   "), vec!["Oslo"]);
    }

    #[test]
    fn test_add_search_term_returns_history_when_write_fails() {
        let store = PreferenceStore::new(MemoryBackend::with_quota(4));
        let history = store.add_search_term("Reykjavik");
        assert_eq!(history, vec!["Reykjavik"]);
        assert!(store.search_history().is_empty());
    }

    #[test]
    fn test_clear_search_history() {
        let store = store();
        store.add_search_term("Rome");
        assert!(store.clear_search_history());
        assert!(store.search_history().is_empty());
    }

    // --- Favorites ---

    #[test]
    fn test_add_favorite_appends_with_timestamp() {
        let store = store();
        let at = datetime!(2026-10-18 12:00:00 UTC);

        store.add_favorite_at(paris(), at).unwrap();
        let favorites = store
            .add_favorite_at(NewFavorite::new("Tokyo", "Japan", 35.68, 139.69), at)
            .unwrap();

        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Paris");
        assert_eq!(favorites[1].name, "Tokyo");
        assert_eq!(favorites[1].added_at, at);
        assert_eq!(store.favorites(), favorites);
    }

    #[test]
    fn test_add_duplicate_favorite_fails() {
        let store = store();
        store.add_favorite(paris()).unwrap();

        let err = store
            .add_favorite(NewFavorite::new("paris", "France", 0.0, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            AddFavoriteError::AlreadyExists {
                name: "paris".to_string()
            }
        );
        assert!(err.to_string().contains("already in your favorites"));

        let favorites = store.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Paris");
    }

    #[test]
    fn test_add_favorite_not_saved() {
        let store = PreferenceStore::new(MemoryBackend::with_quota(10));
        let err = store.add_favorite(paris()).unwrap_err();
        assert!(matches!(err, AddFavoriteError::NotSaved { .. }));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_remove_favorite_case_insensitive() {
        let store = store();
        store
            .add_favorite(NewFavorite::new("Tokyo", "Japan", 35.68, 139.69))
            .unwrap();
        assert!(store.remove_favorite("TOKYO").is_empty());
        assert!(!store.is_favorite("Tokyo"));
    }

    #[test]
    fn test_remove_missing_favorite_is_noop() {
        let store = store();
        assert!(store.remove_favorite("Nowhere").is_empty());

        store.add_favorite(paris()).unwrap();
        let favorites = store.remove_favorite("Nowhere");
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_is_favorite() {
        let store = store();
        assert!(!store.is_favorite("Paris"));
        store.add_favorite(paris()).unwrap();
        assert!(store.is_favorite("PARIS"));
        assert!(store.is_favorite("paris"));
        assert!(!store.is_favorite("Lyon"));
    }

    // --- Theme / unit ---

    #[test]
    fn test_theme_round_trip_and_default() {
        let store = store();
        assert_eq!(store.theme(), Theme::Light);
        assert!(store.set_theme(Theme::Dark));
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_unit_round_trip_and_default() {
        let store = store();
        assert_eq!(store.unit(), TemperatureUnit::Celsius);
        assert!(store.set_unit(TemperatureUnit::Fahrenheit));
        assert_eq!(store.unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let store = store();
        store
            .backend()
            .set_item(PreferenceKey::Theme.storage_key(), "\"solarized\"")
            .unwrap();
        assert_eq!(store.theme(), Theme::Light);
    }

    // --- Whole store ---

    #[test]
    fn test_clear_all_removes_every_key() {
        let store = store();
        store.add_search_term("Lima");
        store.add_favorite(paris()).unwrap();
        store.set_theme(Theme::Dark);
        store.set_unit(TemperatureUnit::Fahrenheit);
        assert_eq!(store.backend().len(), 4);

        store.clear_all();
        assert!(store.backend().is_empty());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_usage_stats() {
        let store = store();
        let empty = store.usage_stats();
        assert_eq!(empty.total_bytes, 0);
        assert!(empty.keys.iter().all(|k| k.bytes == 0));

        store.set_theme(Theme::Dark); // "\"dark\"" = 6 bytes
        store.add_search_term("Lima"); // ["Lima"] = 8 bytes

        let stats = store.usage_stats();
        assert_eq!(stats.bytes_for(PreferenceKey::Theme), 6);
        assert_eq!(stats.bytes_for(PreferenceKey::SearchHistory), 8);
        assert_eq!(stats.bytes_for(PreferenceKey::Unit), 0);
        assert_eq!(stats.total_bytes, 14);
        assert_eq!(stats.total_kib, 0.01);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let source = store();
        source.add_search_term("Lima");
        source.add_search_term("Quito");
        source.add_favorite(paris()).unwrap();
        source.set_unit(TemperatureUnit::Fahrenheit);

        let snapshot = source.export_snapshot();
        let target = store();
        let result = target.import_snapshot(snapshot.clone());

        assert!(result.saved);
        assert_eq!(result.history_entries, 2);
        assert_eq!(result.favorites_imported, 1);
        assert_eq!(target.export_snapshot(), snapshot);
    }

    #[test]
    fn test_import_enforces_invariants() {
        let at = datetime!(2026-01-01 00:00:00 UTC);
        let mut history: Vec<String> = (0..12).map(|i| format!("City {i}")).collect();
        history.insert(1, "city 0".to_string());
        history.insert(2, "".to_string());

        let snapshot = PreferencesSnapshot {
            search_history: history,
            favorites: vec![
                paris().added_at(at),
                NewFavorite::new("PARIS", "France", 0.0, 0.0).added_at(at),
            ],
            theme: Theme::Dark,
            unit: TemperatureUnit::Celsius,
        };

        let store = store();
        let result = store.import_snapshot(snapshot);

        assert_eq!(result.history_entries, MAX_SEARCH_HISTORY);
        assert_eq!(result.favorites_imported, 1);
        assert_eq!(result.favorites_skipped, 1);

        let history = store.search_history();
        assert_eq!(history[0], "City 0");
        assert_eq!(history[1], "City 1");
        assert_eq!(store.favorites()[0].name, "Paris");
        assert_eq!(store.theme(), Theme::Dark);
    }
}
