//! Single-slot persisted snapshot store
//!
//! Owns the one current `RateSnapshot` and its durable JSON form on disk.
//! Callers always get a snapshot that is fresh or just-refreshed; the
//! refresh mechanics stay behind `current`.

use crate::core::clock::Clock;
use crate::core::error::FxError;
use crate::core::provider::RateProvider;
use crate::core::snapshot::RateSnapshot;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct SnapshotStore {
    path: PathBuf,
    provider: Arc<dyn RateProvider>,
    clock: Arc<dyn Clock>,
    // One lock guards the slot and the whole fetch-and-persist sequence:
    // readers see the fully-old or fully-new snapshot and at most one
    // refresh is in flight.
    current: Mutex<Option<Arc<RateSnapshot>>>,
}

impl SnapshotStore {
    pub fn new(path: PathBuf, provider: Arc<dyn RateProvider>, clock: Arc<dyn Clock>) -> Self {
        SnapshotStore {
            path,
            provider,
            clock,
            current: Mutex::new(None),
        }
    }

    /// Returns the current snapshot, refreshing first if none is persisted
    /// or the persisted one is stale. A fresh snapshot is served without
    /// any network access.
    pub async fn current(&self) -> Result<Arc<RateSnapshot>, FxError> {
        let mut slot = self.current.lock().await;

        if slot.is_none() {
            *slot = self.load_from_disk()?.map(Arc::new);
        }

        if let Some(snapshot) = slot.as_ref() {
            if snapshot.is_fresh(self.clock.today_utc()) {
                debug!(date = %snapshot.date, "Snapshot is fresh");
                return Ok(Arc::clone(snapshot));
            }
            debug!(date = %snapshot.date, "Snapshot is stale");
        }

        self.refresh_slot(&mut slot).await
    }

    /// Fetches and installs a new snapshot unconditionally. On failure the
    /// previous snapshot, in memory and on disk, is left untouched.
    pub async fn refresh(&self) -> Result<Arc<RateSnapshot>, FxError> {
        let mut slot = self.current.lock().await;
        self.refresh_slot(&mut slot).await
    }

    async fn refresh_slot(
        &self,
        slot: &mut Option<Arc<RateSnapshot>>,
    ) -> Result<Arc<RateSnapshot>, FxError> {
        let snapshot = self.provider.fetch_latest().await?;
        self.persist(&snapshot)?;

        let snapshot = Arc::new(snapshot);
        *slot = Some(Arc::clone(&snapshot));
        info!(base = %snapshot.base, date = %snapshot.date, "Installed new rate snapshot");
        Ok(snapshot)
    }

    fn load_from_disk(&self) -> Result<Option<RateSnapshot>, FxError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<RateSnapshot>(&contents) {
                Ok(snapshot) => {
                    debug!(
                        date = %snapshot.date,
                        "Loaded persisted snapshot from {}",
                        self.path.display()
                    );
                    Ok(Some(snapshot))
                }
                Err(e) => {
                    // A corrupt file is treated like a missing one; the
                    // next successful refresh overwrites it.
                    warn!("Persisted rates file is unparseable, refetching: {e}");
                    Ok(None)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FxError::StorageUnavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn persist(&self, snapshot: &RateSnapshot) -> Result<(), FxError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                warn!("Failed to create directory {}: {e}", parent.display());
                FxError::StorageUnavailable(format!("{}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| FxError::StorageUnavailable(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            FxError::StorageUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        debug!("Persisted snapshot to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today_utc(&self) -> NaiveDate {
            self.0
        }
    }

    struct FakeProvider {
        snapshot: Result<RateSnapshot, String>,
        call_count: AtomicUsize,
    }

    impl FakeProvider {
        fn returning(snapshot: RateSnapshot) -> Arc<Self> {
            Arc::new(FakeProvider {
                snapshot: Ok(snapshot),
                call_count: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(FakeProvider {
                snapshot: Err(message.to_string()),
                call_count: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for FakeProvider {
        async fn fetch_latest(&self) -> Result<RateSnapshot, FxError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.snapshot
                .clone()
                .map_err(FxError::RefreshFailed)
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn snapshot_for(day: &str) -> RateSnapshot {
        let rates = HashMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.9),
            ("JPY".to_string(), 140.0),
        ]);
        RateSnapshot::new("USD", date(day), rates).unwrap()
    }

    fn store_at(
        dir: &TempDir,
        provider: Arc<dyn RateProvider>,
        today: &str,
    ) -> SnapshotStore {
        SnapshotStore::new(
            dir.path().join("rates.json"),
            provider,
            Arc::new(FixedClock(date(today))),
        )
    }

    #[tokio::test]
    async fn test_first_access_fetches_and_persists() {
        let dir = TempDir::new().unwrap();
        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider.clone(), "2024-01-10");

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.date, date("2024-01-10"));
        assert_eq!(provider.calls(), 1);

        // Persisted form agrees with the in-memory snapshot
        let on_disk: RateSnapshot =
            serde_json::from_str(&fs::read_to_string(dir.path().join("rates.json")).unwrap())
                .unwrap();
        assert_eq!(on_disk, *snapshot);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_served_without_fetch() {
        let dir = TempDir::new().unwrap();
        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider.clone(), "2024-01-10");

        store.current().await.unwrap();
        store.current().await.unwrap();
        store.current().await.unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_yesterdays_snapshot_is_still_served() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rates.json"),
            serde_json::to_string_pretty(&snapshot_for("2024-01-09")).unwrap(),
        )
        .unwrap();

        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider.clone(), "2024-01-10");

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.date, date("2024-01-09"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_snapshot_triggers_refresh() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("rates.json"),
            serde_json::to_string_pretty(&snapshot_for("2024-01-08")).unwrap(),
        )
        .unwrap();

        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider.clone(), "2024-01-10");

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.date, date("2024-01-10"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_previous_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rates.json");
        let previous = serde_json::to_string_pretty(&snapshot_for("2024-01-01")).unwrap();
        fs::write(&path, &previous).unwrap();

        let provider = FakeProvider::failing("HTTP error: 500 from provider");
        let store = store_at(&dir, provider, "2024-01-10");

        let result = store.current().await;
        assert!(matches!(result, Err(FxError::RefreshFailed(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), previous);
    }

    #[tokio::test]
    async fn test_refresh_replaces_persisted_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(
            &path,
            serde_json::to_string_pretty(&snapshot_for("2024-01-08")).unwrap(),
        )
        .unwrap();

        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider, "2024-01-10");

        store.refresh().await.unwrap();
        let on_disk: RateSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.date, date("2024-01-10"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_on_refresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, "{ not valid json").unwrap();

        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = store_at(&dir, provider.clone(), "2024-01-10");

        let snapshot = store.current().await.unwrap();
        assert_eq!(snapshot.date, date("2024-01-10"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_persist_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dir").join("rates.json");
        let provider = FakeProvider::returning(snapshot_for("2024-01-10"));
        let store = SnapshotStore::new(
            path.clone(),
            provider,
            Arc::new(FixedClock(date("2024-01-10"))),
        );

        store.current().await.unwrap();
        assert!(path.exists());
    }
}
