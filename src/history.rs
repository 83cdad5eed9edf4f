//! Bounded search-history ledger.
//!
//! Persists the last [`HISTORY_CAP`] lookups as a single JSON document,
//! deduplicated by case-insensitive city name and ordered most-recent-first.
//! Every operation reads the whole document and writes it back; the mutex
//! serializes that read-modify-write so concurrent requests cannot drop each
//! other's updates.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::WeatherError;
use crate::models::{HistoryEntry, HistoryLog, WeatherReading};

// ---

/// Maximum number of entries retained in the log.
pub const HISTORY_CAP: usize = 10;

#[derive(Debug)]
pub struct HistoryLedger {
    // ---
    path: PathBuf,
    /// Guards the read-modify-write cycle on the document.
    lock: Mutex<()>,
}

impl HistoryLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        // ---
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Record a lookup. Best-effort: a failed write is logged and swallowed
    /// so the weather response itself is never affected.
    pub async fn record(&self, city: &str, reading: &WeatherReading) {
        // ---
        let _guard = self.lock.lock().await;

        let mut log = self.read_log().await;
        apply_entry(&mut log.searches, HistoryEntry::from_reading(city, reading));

        if let Err(e) = self.write_log(&log).await {
            warn!("Failed to persist history for '{}': {}", city, e);
        }
    }

    /// Entries most-recent-first. Missing or corrupt state reads as empty.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        // ---
        let _guard = self.lock.lock().await;
        self.read_log().await.searches
    }

    /// Reset the log to an empty document. Unlike `record`, a write failure
    /// here propagates so the caller can report it.
    pub async fn clear(&self) -> Result<(), WeatherError> {
        // ---
        let _guard = self.lock.lock().await;
        self.write_log(&HistoryLog::default()).await
    }

    // ---

    async fn read_log(&self) -> HistoryLog {
        // ---
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("History file is corrupt, starting fresh: {}", e);
                HistoryLog::default()
            }),
            Err(e) => {
                debug!("No readable history at {:?}: {}", self.path, e);
                HistoryLog::default()
            }
        }
    }

    async fn write_log(&self, log: &HistoryLog) -> Result<(), WeatherError> {
        // ---
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent).await?;
        }

        // Pretty-printed to keep the document hand-inspectable.
        let raw = serde_json::to_string_pretty(log)
            .map_err(|e| WeatherError::StorageWrite(e.into()))?;

        tokio::fs::write(&self.path, raw)
            .await
            .map_err(WeatherError::StorageWrite)
    }
}

async fn ensure_dir(parent: &Path) -> Result<(), WeatherError> {
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(WeatherError::StorageWrite)
}

// ---

/// Pure dedup/cap transform: drop any case-insensitive duplicate of the new
/// entry's city, insert the entry at the front, truncate to the cap.
fn apply_entry(searches: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    // ---
    let city_lc = entry.city.to_lowercase();
    searches.retain(|s| s.city.to_lowercase() != city_lc);
    searches.insert(0, entry);
    searches.truncate(HISTORY_CAP);
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::make_test_reading;
    use chrono::Utc;

    fn entry(city: &str, temp: i32) -> HistoryEntry {
        // ---
        HistoryEntry {
            city: city.to_string(),
            country: "GB".to_string(),
            temp,
            condition: "Clear".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_apply_entry_dedups_case_insensitively() {
        // ---
        let mut searches = vec![entry("Tokyo", 18)];
        apply_entry(&mut searches, entry("TOKYO", 21));

        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].city, "TOKYO");
        assert_eq!(searches[0].temp, 21);
    }

    #[test]
    fn test_apply_entry_moves_duplicate_to_front() {
        // ---
        let mut searches = vec![entry("Paris", 15), entry("Lima", 19)];
        apply_entry(&mut searches, entry("lima", 20));

        let cities: Vec<_> = searches.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(cities, vec!["lima", "Paris"]);
    }

    #[test]
    fn test_apply_entry_enforces_cap() {
        // ---
        let mut searches = Vec::new();
        for i in 0..15 {
            apply_entry(&mut searches, entry(&format!("City{i}"), i));
        }

        assert_eq!(searches.len(), HISTORY_CAP);
        // Most recent first: City14 down to City5.
        assert_eq!(searches[0].city, "City14");
        assert_eq!(searches[9].city, "City5");
    }

    #[tokio::test]
    async fn test_record_twice_keeps_one_entry() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let ledger = HistoryLedger::new(dir.path().join("history.json"));

        let first = make_test_reading(18.0, "Clouds", 50, 2.0, 10_000);
        let second = make_test_reading(21.0, "Clear", 50, 2.0, 10_000);
        ledger.record("Madrid", &first).await;
        ledger.record("Madrid", &second).await;

        let entries = ledger.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].temp, 21);
        assert_eq!(entries[0].condition, "Clear");
    }

    #[tokio::test]
    async fn test_record_fifteen_cities_keeps_ten() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let ledger = HistoryLedger::new(dir.path().join("history.json"));
        let reading = make_test_reading(20.0, "Clear", 50, 2.0, 10_000);

        for i in 0..15 {
            ledger.record(&format!("City{i}"), &reading).await;
        }

        let entries = ledger.list().await;
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].city, "City14");
        assert_eq!(entries[9].city, "City5");
    }

    #[tokio::test]
    async fn test_list_without_file_is_empty() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let ledger = HistoryLedger::new(dir.path().join("missing.json"));
        assert!(ledger.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_with_corrupt_file_is_empty() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(&path, "not json {").await.unwrap();

        let ledger = HistoryLedger::new(path);
        assert!(ledger.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_list_is_empty() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let ledger = HistoryLedger::new(dir.path().join("history.json"));
        let reading = make_test_reading(20.0, "Clear", 50, 2.0, 10_000);

        ledger.record("Rome", &reading).await;
        ledger.clear().await.unwrap();

        assert!(ledger.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_swallows_write_failure() {
        // ---
        // Parent "directory" is a regular file, so the write must fail; the
        // call still completes without error.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.unwrap();

        let ledger = HistoryLedger::new(blocker.join("history.json"));
        let reading = make_test_reading(20.0, "Clear", 50, 2.0, 10_000);
        ledger.record("Rome", &reading).await;

        assert!(ledger.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_propagates_write_failure() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.unwrap();

        let ledger = HistoryLedger::new(blocker.join("history.json"));
        assert!(ledger.clear().await.is_err());
    }

    #[tokio::test]
    async fn test_persists_original_document_shape() {
        // ---
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let ledger = HistoryLedger::new(path.clone());
        let reading = make_test_reading(20.0, "Clear", 50, 2.0, 10_000);

        ledger.record("Berlin", &reading).await;

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc.get("searches").and_then(|s| s.as_array()).is_some());
    }
}
