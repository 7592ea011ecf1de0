//! Integration tests for nimbus-store.
//!
//! These exercise the public API end to end over each backend, plus
//! property tests for the search history and favorites invariants.

use std::io;
use std::sync::{Arc, Mutex};

use nimbus_store::{
    MAX_SEARCH_HISTORY, MemoryBackend, PreferenceKey, PreferenceStore, SqliteBackend,
    StorageBackend,
};
use nimbus_types::{NewFavorite, TemperatureUnit, Theme, names_match};
use proptest::prelude::*;

/// Captures formatted tracing output so tests can assert on diagnostics.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn test_sqlite_store_persists_preferences() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.db");

    {
        let store = PreferenceStore::new(SqliteBackend::open(&path).unwrap());
        store.add_search_term("Nairobi");
        store
            .add_favorite(NewFavorite::new("Nairobi", "Kenya", -1.29, 36.82))
            .unwrap();
        store.set_theme(Theme::Dark);
        store.set_unit(TemperatureUnit::Fahrenheit);
    }

    let store = PreferenceStore::new(SqliteBackend::open(&path).unwrap());
    assert_eq!(store.search_history(), vec!["Nairobi"]);
    assert!(store.is_favorite("nairobi"));
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(store.unit(), TemperatureUnit::Fahrenheit);

    let stats = store.usage_stats();
    let expected: u64 = stats.keys.iter().map(|k| k.bytes).sum();
    assert_eq!(stats.total_bytes, expected);
    assert!(stats.keys.iter().all(|k| k.bytes > 0));
}

#[test]
fn test_unavailable_storage_never_fails_callers() {
    let store = PreferenceStore::new(MemoryBackend::new());
    store.backend().set_available(false);

    assert!(store.search_history().is_empty());
    assert_eq!(store.add_search_term("Cairo"), vec!["Cairo"]);
    assert!(store.favorites().is_empty());
    assert!(store.remove_favorite("Cairo").is_empty());
    assert!(!store.is_favorite("Cairo"));
    assert_eq!(store.theme(), Theme::Light);
    assert_eq!(store.unit(), TemperatureUnit::Celsius);
    assert!(!store.set_unit(TemperatureUnit::Fahrenheit));
    store.clear_all();
    assert_eq!(store.usage_stats().total_bytes, 0);
}

#[test]
fn test_read_failure_is_reported() {
    let store = PreferenceStore::new(MemoryBackend::new());
    store
        .backend()
        .set_item(PreferenceKey::Favorites.storage_key(), "{broken")
        .unwrap();

    let logs = with_captured_logs(|| {
        assert!(store.favorites().is_empty());
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("nimbus.favorites"));
}

#[test]
fn test_write_failure_is_reported() {
    let store = PreferenceStore::new(MemoryBackend::with_quota(16));

    let logs = with_captured_logs(|| {
        assert!(!store.set_theme(Theme::Dark));
    });

    assert!(logs.contains("quota exceeded"));
}

#[test]
fn test_duplicate_favorite_is_not_a_diagnostic() {
    let store = PreferenceStore::new(MemoryBackend::new());
    store
        .add_favorite(NewFavorite::new("Paris", "France", 48.85, 2.35))
        .unwrap();

    let logs = with_captured_logs(|| {
        assert!(
            store
                .add_favorite(NewFavorite::new("paris", "France", 48.85, 2.35))
                .is_err()
        );
    });

    assert!(!logs.contains("WARN"));
    assert!(!logs.contains("ERROR"));
    assert_eq!(store.favorites().len(), 1);
    assert_eq!(store.favorites()[0].name, "Paris");
}

#[test]
fn test_usage_stats_zero_for_absent_keys() {
    let store = PreferenceStore::new(MemoryBackend::new());
    store.set_unit(TemperatureUnit::Celsius);

    let stats = store.usage_stats();
    assert_eq!(stats.bytes_for(PreferenceKey::SearchHistory), 0);
    assert_eq!(stats.bytes_for(PreferenceKey::Favorites), 0);
    assert_eq!(stats.bytes_for(PreferenceKey::Theme), 0);
    assert_eq!(stats.bytes_for(PreferenceKey::Unit), "\"celsius\"".len() as u64);
    assert_eq!(stats.total_bytes, stats.bytes_for(PreferenceKey::Unit));
}

fn city() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Paris", "paris", "PARIS", "Lima", "lima", "Oslo", "Quito", "Rome", "Accra", "Hanoi",
        "Perth", "Bern", "Kyiv", "Baku", "Doha", "Riga", "Sofia", "Turin",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn history_never_exceeds_limit_and_stays_unique(searches in prop::collection::vec(city(), 0..40)) {
        let store = PreferenceStore::new(MemoryBackend::new());
        for term in &searches {
            store.add_search_term(term);
        }

        let history = store.search_history();
        prop_assert!(history.len() <= MAX_SEARCH_HISTORY);
        for (i, a) in history.iter().enumerate() {
            for b in &history[i + 1..] {
                prop_assert!(!names_match(a, b));
            }
        }
        if let Some(last) = searches.last() {
            prop_assert_eq!(&history[0], last);
        }
    }

    #[test]
    fn is_favorite_agrees_with_membership(names in prop::collection::vec(city(), 0..12), probe in city()) {
        let store = PreferenceStore::new(MemoryBackend::new());
        for name in &names {
            let _ = store.add_favorite(NewFavorite::new(name.clone(), "", 0.0, 0.0));
        }

        let favorites = store.favorites();
        let member = favorites.iter().any(|f| f.name.to_lowercase() == probe.to_lowercase());
        prop_assert_eq!(store.is_favorite(&probe), member);

        for (i, a) in favorites.iter().enumerate() {
            for b in &favorites[i + 1..] {
                prop_assert!(!names_match(&a.name, &b.name));
            }
        }
    }
}
