//! Application state shared with a presentation layer.

use std::sync::Arc;
use tracing::debug;

use crate::core::{ConversionRequest, ConversionSummary, FileRecord, FileRecordStore};
use crate::processing::{ConversionPipeline, DirectoryScanner};
use crate::storage::{LocalStorage, Locator, Storage};
use crate::utils::ConvertResult;

/// Application state: the storage backend plus the observable record store.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn Storage>,
    store: Arc<FileRecordStore>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(LocalStorage::new()))
    }
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            store: Arc::new(FileRecordStore::new()),
        }
    }

    /// Store observed by the presentation layer.
    pub fn store(&self) -> &Arc<FileRecordStore> {
        &self.store
    }

    /// Replaces the stored records with the images found in `source`.
    ///
    /// Previous records are cleared before listing starts, so a failed scan
    /// leaves the store empty. Rejected while a run is in flight.
    pub fn scan(&self, source: &Locator) -> ConvertResult<Vec<FileRecord>> {
        let _guard = self.store.begin_scan()?;
        self.store.clear();

        let records = DirectoryScanner::new(self.storage.clone()).scan(source)?;
        self.store.replace(records.clone());
        debug!("Store now holds {} records", records.len());
        Ok(records)
    }

    /// Runs a blocking conversion over the current records.
    pub fn run(&self, request: &ConversionRequest) -> ConvertResult<ConversionSummary> {
        ConversionPipeline::new(self.storage.clone(), self.store.clone()).run(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessStatus;
    use crate::utils::{ConvertError, TargetFormat};
    use std::fs;

    fn locator_of(path: &std::path::Path) -> Locator {
        Locator::new(path.to_string_lossy().to_string())
    }

    #[test]
    fn scan_is_idempotent_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"aaaa").unwrap();
        fs::write(dir.path().join("b.gif"), b"bb").unwrap();
        fs::write(dir.path().join("c.txt"), b"c").unwrap();

        let state = AppState::default();
        let first = state.scan(&locator_of(dir.path())).unwrap();
        let second = state.scan(&locator_of(dir.path())).unwrap();

        assert_eq!(first, second);
        assert_eq!(state.store().records(), second);
        assert_eq!(state.store().len(), 2);
    }

    #[test]
    fn failed_scan_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"aaaa").unwrap();

        let state = AppState::default();
        state.scan(&locator_of(dir.path())).unwrap();
        assert_eq!(state.store().len(), 1);

        let err = state.scan(&locator_of(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, ConvertError::Access(_)));
        assert!(state.store().is_empty());
    }

    #[test]
    fn scan_is_rejected_during_a_run() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::default();
        let _run = state.store().begin_run().unwrap();

        let err = state.scan(&locator_of(dir.path())).unwrap_err();
        assert!(matches!(err, ConvertError::Busy(_)));
    }

    #[test]
    fn clones_share_the_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"aaaa").unwrap();

        let state = AppState::default();
        let other = state.clone();
        state.scan(&locator_of(dir.path())).unwrap();

        // Not a real PNG, so the run records a decode error
        other.run(&ConversionRequest::new(locator_of(dir.path()), TargetFormat::Png)).unwrap();
        assert!(matches!(
            state.store().records()[0].status,
            ProcessStatus::Error(ConvertError::Decode(_))
        ));
    }
}
