//! Command handlers for scanning and converting.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};
use crate::core::{
    AppState, ConversionProgress, ConversionRequest, ConversionSummary, FileRecord, StoreEvent,
};
use crate::storage::Locator;
use crate::utils::ConvertResult;

/// Scans `source` on a background worker.
///
/// # Returns
/// The new record set, also published through the state's store.
pub async fn scan_directory(state: AppState, source: Locator) -> ConvertResult<Vec<FileRecord>> {
    debug!("Received scan_directory command for {}", source);
    tokio::task::spawn_blocking(move || state.scan(&source)).await?
}

/// Converts the records currently held by `state` on a background worker.
///
/// Files are handled one at a time. Progress and per-file status are published
/// through the state's store while the future is pending.
///
/// # Returns
/// A summary of the run, or the error that prevented it from starting.
pub async fn convert_images(
    state: AppState,
    request: ConversionRequest,
) -> ConvertResult<ConversionSummary> {
    debug!(
        "Received convert_images command for {} ({} records)",
        request.source,
        state.store().len()
    );
    tokio::task::spawn_blocking(move || state.run(&request)).await?
}

/// Feeds each non-empty progress update to `on_progress` until the run ends.
///
/// Subscribe before starting the run, otherwise early updates are lost.
/// Returns once the store reports `running == false` or closes.
pub async fn watch_progress(
    mut events: broadcast::Receiver<StoreEvent>,
    mut on_progress: impl FnMut(ConversionProgress) + Send,
) {
    loop {
        match events.recv().await {
            Ok(StoreEvent::Progress { progress }) if progress.total > 0 => on_progress(progress),
            Ok(StoreEvent::RunningChanged { running: false }) => break,
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => warn!("Progress watcher lagged by {} events", skipped),
            Err(RecvError::Closed) => break,
        }
    }
}
