//! Observable record collection shared by the scanner, the pipeline and any
//! presentation layer.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{PoisonError, RwLock};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::core::{ConversionProgress, FileRecord, ProcessStatus};
use crate::utils::{ConvertError, ConvertResult};

const EVENT_CAPACITY: usize = 1024;

const IDLE: u8 = 0;
const SCANNING: u8 = 1;
const RUNNING: u8 = 2;

/// Change notification published after the store has been updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    /// The whole record set was replaced (scan or clear)
    RecordsReplaced { count: usize },
    /// One record moved to a new status
    StatusChanged { index: usize, status: ProcessStatus },
    Progress { progress: ConversionProgress },
    RunningChanged { running: bool },
}

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<FileRecord>,
    progress: ConversionProgress,
}

/// Ordered, thread-safe set of [`FileRecord`]s.
///
/// Observers either poll ([`records`](Self::records),
/// [`progress`](Self::progress), [`is_running`](Self::is_running)) or
/// [`subscribe`](Self::subscribe) to [`StoreEvent`]s.
#[derive(Debug)]
pub struct FileRecordStore {
    state: RwLock<StoreState>,
    activity: AtomicU8,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileRecordStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(StoreState::default()),
            activity: AtomicU8::new(IDLE),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current records
    pub fn records(&self) -> Vec<FileRecord> {
        self.read(|state| state.records.clone())
    }

    pub fn len(&self) -> usize {
        self.read(|state| state.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn progress(&self) -> ConversionProgress {
        self.read(|state| state.progress)
    }

    pub fn is_running(&self) -> bool {
        self.activity.load(Ordering::Acquire) == RUNNING
    }

    pub fn is_scanning(&self) -> bool {
        self.activity.load(Ordering::Acquire) == SCANNING
    }

    pub(crate) fn clear(&self) {
        self.replace(Vec::new());
    }

    pub(crate) fn replace(&self, records: Vec<FileRecord>) {
        let count = records.len();
        self.write(|state| state.records = records);
        self.publish(StoreEvent::RecordsReplaced { count });
    }

    pub(crate) fn set_status(&self, index: usize, status: ProcessStatus) {
        let updated = self.write(|state| match state.records.get_mut(index) {
            Some(record) => {
                record.status = status.clone();
                true
            }
            None => false,
        });
        if updated {
            self.publish(StoreEvent::StatusChanged { index, status });
        }
    }

    /// Puts every record back to Idle before a run.
    pub(crate) fn reset_statuses(&self) {
        let count = self.write(|state| {
            state.records.iter_mut().for_each(|r| r.status = ProcessStatus::Idle);
            state.records.len()
        });
        for index in 0..count {
            self.publish(StoreEvent::StatusChanged { index, status: ProcessStatus::Idle });
        }
    }

    pub(crate) fn set_progress(&self, progress: ConversionProgress) {
        self.write(|state| state.progress = progress);
        self.publish(StoreEvent::Progress { progress });
    }

    /// Claims the store for a conversion run.
    pub(crate) fn begin_run(&self) -> ConvertResult<ActivityGuard<'_>> {
        self.claim(RUNNING, "a conversion run")
    }

    /// Claims the store for a directory scan.
    pub(crate) fn begin_scan(&self) -> ConvertResult<ActivityGuard<'_>> {
        self.claim(SCANNING, "a directory scan")
    }

    fn claim(&self, activity: u8, what: &str) -> ConvertResult<ActivityGuard<'_>> {
        self.activity
            .compare_exchange(IDLE, activity, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|current| {
                let holder = if current == RUNNING { "a conversion run" } else { "a directory scan" };
                ConvertError::busy(format!("Cannot start {what} while {holder} is in progress"))
            })?;

        if activity == RUNNING {
            self.publish(StoreEvent::RunningChanged { running: true });
        }
        Ok(ActivityGuard { store: self, activity })
    }

    fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine, pollers still see the state
        if self.events.send(event).is_err() {
            debug!("Store event dropped, no subscribers");
        }
    }
}

/// Releases the store's activity flag on drop.
///
/// For runs this also resets progress to 0 and flips `running` back to false,
/// whichever way the run ended.
pub(crate) struct ActivityGuard<'a> {
    store: &'a FileRecordStore,
    activity: u8,
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        if self.activity == RUNNING {
            self.store.set_progress(ConversionProgress::default());
        }
        self.store.activity.store(IDLE, Ordering::Release);
        if self.activity == RUNNING {
            self.store.publish(StoreEvent::RunningChanged { running: false });
        }
    }
}
