//! Preferences persisted in browser `localStorage`.

use nimbus_store::{
    AddFavoriteError, DEFAULT_QUOTA_BYTES, Error, PreferenceStore, PreferencesSnapshot, Result,
    StorageBackend,
};
use nimbus_types::{FavoriteLocation, NewFavorite, TemperatureUnit, Theme};
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DomException, Storage};

use crate::to_js;

/// [`StorageBackend`] over `window.localStorage`.
///
/// Resolved once at construction. If the page has no storage (disabled,
/// sandboxed iframe, some private modes) every operation fails with
/// [`Error::Unavailable`], which the store turns into defaults.
pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage is not available; preferences will not persist");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::Unavailable("localStorage is not available".to_string()))
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| Error::Unavailable(js_error_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(|e| {
            if is_quota_error(&e) {
                Error::QuotaExceeded {
                    key: key.to_string(),
                    needed: (key.len() + value.len()) as u64,
                    limit: DEFAULT_QUOTA_BYTES,
                }
            } else {
                Error::Unavailable(js_error_message(&e))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| Error::Unavailable(js_error_message(&e)))
    }
}

fn is_quota_error(error: &JsValue) -> bool {
    error
        .dyn_ref::<DomException>()
        .is_some_and(|e| e.name() == "QuotaExceededError")
}

pub(crate) fn js_error_message(error: &JsValue) -> String {
    if let Some(e) = error.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

/// What `addFavorite` hands back to JavaScript: either
/// `{ success: true, favorites }` or `{ success: false, message }`.
#[derive(Debug, Serialize)]
pub(crate) struct AddFavoriteOutcome {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favorites: Option<Vec<FavoriteLocation>>,
}

impl AddFavoriteOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            favorites: None,
        }
    }
}

impl From<std::result::Result<Vec<FavoriteLocation>, AddFavoriteError>> for AddFavoriteOutcome {
    fn from(result: std::result::Result<Vec<FavoriteLocation>, AddFavoriteError>) -> Self {
        match result {
            Ok(favorites) => Self {
                success: true,
                message: None,
                favorites: Some(favorites),
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Weather dashboard preferences, exported to JavaScript.
///
/// ```js
/// const prefs = new WeatherStorage();
/// prefs.addSearchTerm("Lisbon");
/// prefs.setTheme("dark");
/// console.log(prefs.getStorageStats().totalKib);
/// ```
#[wasm_bindgen]
pub struct WeatherStorage {
    store: PreferenceStore<LocalStorageBackend>,
}

#[wasm_bindgen]
impl WeatherStorage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WeatherStorage {
        WeatherStorage {
            store: PreferenceStore::new(LocalStorageBackend::new()),
        }
    }

    /// Whether `localStorage` could be reached at all.
    #[wasm_bindgen(js_name = isAvailable)]
    pub fn is_available(&self) -> bool {
        self.store.backend().is_available()
    }

    /// Recent searches, most recent first.
    #[wasm_bindgen(js_name = getSearchHistory)]
    pub fn search_history(&self) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.search_history())?)
    }

    /// Record a search and return the updated history.
    #[wasm_bindgen(js_name = addSearchTerm)]
    pub fn add_search_term(&self, city: &str) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.add_search_term(city))?)
    }

    #[wasm_bindgen(js_name = clearSearchHistory)]
    pub fn clear_search_history(&self) -> bool {
        self.store.clear_search_history()
    }

    #[wasm_bindgen(js_name = getFavorites)]
    pub fn favorites(&self) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.favorites())?)
    }

    /// Add `{ name, country, latitude, longitude }` to the favorites.
    ///
    /// Resolves to `{ success: true, favorites }`, or to
    /// `{ success: false, message }` with a user-facing message when the name
    /// is already a favorite, the list could not be saved, or `location` is
    /// malformed.
    #[wasm_bindgen(js_name = addFavorite)]
    pub fn add_favorite(&self, location: JsValue) -> std::result::Result<JsValue, JsError> {
        let outcome = match serde_wasm_bindgen::from_value::<NewFavorite>(location) {
            Ok(location) => AddFavoriteOutcome::from(self.store.add_favorite(location)),
            Err(e) => {
                warn!("Rejected malformed favorite: {}", e);
                AddFavoriteOutcome::failure(format!("Invalid location: {}", e))
            }
        };
        Ok(to_js(&outcome)?)
    }

    #[wasm_bindgen(js_name = removeFavorite)]
    pub fn remove_favorite(&self, name: &str) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.remove_favorite(name))?)
    }

    #[wasm_bindgen(js_name = isFavorite)]
    pub fn is_favorite(&self, name: &str) -> bool {
        self.store.is_favorite(name)
    }

    /// `"light"` or `"dark"`.
    #[wasm_bindgen(js_name = getTheme)]
    pub fn theme(&self) -> String {
        self.store.theme().as_str().to_string()
    }

    /// Returns `false` if `theme` is not `"light"` or `"dark"`, or the write
    /// failed.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, theme: &str) -> bool {
        match theme.parse::<Theme>() {
            Ok(theme) => self.store.set_theme(theme),
            Err(e) => {
                warn!("Ignoring theme {:?}: {}", theme, e);
                false
            }
        }
    }

    /// `"celsius"` or `"fahrenheit"`.
    #[wasm_bindgen(js_name = getUnit)]
    pub fn unit(&self) -> String {
        self.store.unit().as_str().to_string()
    }

    /// Returns `false` if `unit` is not a known unit, or the write failed.
    #[wasm_bindgen(js_name = setUnit)]
    pub fn set_unit(&self, unit: &str) -> bool {
        match unit.parse::<TemperatureUnit>() {
            Ok(unit) => self.store.set_unit(unit),
            Err(e) => {
                warn!("Ignoring unit {:?}: {}", unit, e);
                false
            }
        }
    }

    /// Remove every preference key.
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) {
        self.store.clear_all();
    }

    /// Per-key and total storage use in bytes and KiB.
    #[wasm_bindgen(js_name = getStorageStats)]
    pub fn storage_stats(&self) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.usage_stats())?)
    }

    /// All four preference collections as one object.
    #[wasm_bindgen(js_name = exportPreferences)]
    pub fn export_preferences(&self) -> std::result::Result<JsValue, JsError> {
        Ok(to_js(&self.store.export_snapshot())?)
    }

    /// Restore an object produced by `exportPreferences`.
    #[wasm_bindgen(js_name = importPreferences)]
    pub fn import_preferences(&self, snapshot: JsValue) -> std::result::Result<JsValue, JsError> {
        let snapshot: PreferencesSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
        Ok(to_js(&self.store.import_snapshot(snapshot))?)
    }
}

impl Default for WeatherStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(name: &str) -> FavoriteLocation {
        FavoriteLocation {
            name: name.to_string(),
            country: "PT".to_string(),
            latitude: 38.72,
            longitude: -9.14,
            added_at: time::macros::datetime!(2024-03-01 12:00 UTC),
        }
    }

    #[test]
    fn test_add_favorite_outcome_success() {
        let outcome = AddFavoriteOutcome::from(Ok(vec![favorite("Lisbon")]));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["favorites"][0]["name"], "Lisbon");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_add_favorite_outcome_duplicate() {
        let outcome = AddFavoriteOutcome::from(Err(AddFavoriteError::AlreadyExists {
            name: "Lisbon".to_string(),
        }));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Lisbon is already in your favorites");
        assert!(json.get("favorites").is_none());
    }
}
