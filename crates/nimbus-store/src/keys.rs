//! Fixed storage keys.

use serde::Serialize;

/// Logical preference collections and the storage keys they live under.
///
/// Keys are namespaced so they never collide with unrelated data sharing the
/// same origin's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceKey {
    /// Recently searched city names.
    SearchHistory,
    /// Saved favorite locations.
    Favorites,
    /// Light/dark theme.
    Theme,
    /// Temperature unit.
    Unit,
}

impl PreferenceKey {
    /// Every key, in a stable order.
    pub const ALL: [PreferenceKey; 4] = [
        PreferenceKey::SearchHistory,
        PreferenceKey::Favorites,
        PreferenceKey::Theme,
        PreferenceKey::Unit,
    ];

    /// The key written to the storage substrate.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            PreferenceKey::SearchHistory => "nimbus.searchHistory",
            PreferenceKey::Favorites => "nimbus.favorites",
            PreferenceKey::Theme => "nimbus.theme",
            PreferenceKey::Unit => "nimbus.unit",
        }
    }
}
