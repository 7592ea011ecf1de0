//! Result and snapshot models returned by the preference store.

use serde::{Deserialize, Serialize};

use nimbus_types::{FavoriteLocation, TemperatureUnit, Theme};

use crate::keys::PreferenceKey;

/// Storage used by a single preference key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUsage {
    /// Which preference this is.
    pub key: PreferenceKey,
    /// The key as written to the storage substrate.
    pub storage_key: &'static str,
    /// UTF-8 byte length of the stored raw value (0 if absent).
    pub bytes: u64,
    /// Same size in KiB, rounded to two decimals.
    pub kib: f64,
}

/// Storage used by all preference keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// One entry per [`PreferenceKey`], in [`PreferenceKey::ALL`] order.
    pub keys: Vec<KeyUsage>,
    /// Sum of the per-key sizes.
    pub total_bytes: u64,
    /// Total in KiB, rounded to two decimals.
    pub total_kib: f64,
}

impl UsageStats {
    pub(crate) fn from_sizes(sizes: impl IntoIterator<Item = (PreferenceKey, u64)>) -> Self {
        let keys: Vec<KeyUsage> = sizes
            .into_iter()
            .map(|(key, bytes)| KeyUsage {
                key,
                storage_key: key.storage_key(),
                bytes,
                kib: to_kib(bytes),
            })
            .collect();
        let total_bytes = keys.iter().map(|k| k.bytes).sum();

        Self {
            keys,
            total_bytes,
            total_kib: to_kib(total_bytes),
        }
    }

    /// Bytes used by `key`.
    #[must_use]
    pub fn bytes_for(&self, key: PreferenceKey) -> u64 {
        self.keys
            .iter()
            .find(|usage| usage.key == key)
            .map_or(0, |usage| usage.bytes)
    }
}

fn to_kib(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Every stored preference at once, for backup and transfer between hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesSnapshot {
    /// Search history, most recent first.
    #[serde(default)]
    pub search_history: Vec<String>,
    /// Favorite locations in insertion order.
    #[serde(default)]
    pub favorites: Vec<FavoriteLocation>,
    /// Theme preference.
    #[serde(default)]
    pub theme: Theme,
    /// Temperature unit preference.
    #[serde(default)]
    pub unit: TemperatureUnit,
}

/// Outcome of [`PreferenceStore::import_snapshot`](crate::PreferenceStore::import_snapshot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// History entries kept after de-duplication and truncation.
    pub history_entries: usize,
    /// Favorites written.
    pub favorites_imported: usize,
    /// Favorites dropped as case-insensitive duplicates.
    pub favorites_skipped: usize,
    /// Whether every key was written successfully.
    pub saved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kib_rounding() {
        assert_eq!(to_kib(0), 0.0);
        assert_eq!(to_kib(1024), 1.0);
        assert_eq!(to_kib(1536), 1.5);
        // 100 / 1024 = 0.09765625
        assert_eq!(to_kib(100), 0.1);
    }

    #[test]
    fn test_usage_total_is_sum() {
        let stats = UsageStats::from_sizes([
            (PreferenceKey::SearchHistory, 120),
            (PreferenceKey::Favorites, 900),
            (PreferenceKey::Theme, 7),
            (PreferenceKey::Unit, 0),
        ]);
        assert_eq!(stats.total_bytes, 1027);
        assert_eq!(stats.total_kib, 1.0);
        assert_eq!(stats.bytes_for(PreferenceKey::Favorites), 900);
        assert_eq!(stats.bytes_for(PreferenceKey::Unit), 0);
    }

    #[test]
    fn test_snapshot_missing_fields_use_defaults() {
        let snapshot: PreferencesSnapshot = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert!(snapshot.search_history.is_empty());
        assert_eq!(snapshot.theme, Theme::Dark);
        assert_eq!(snapshot.unit, TemperatureUnit::Celsius);
    }
}
