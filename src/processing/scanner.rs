//! Source directory enumeration.

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{FileRecord, ProcessStatus};
use crate::storage::{ChildEntry, Locator, Storage};
use crate::utils::{ConvertError, ConvertResult, format_file_size};

const IMAGE_MIME_PREFIX: &str = "image";

/// Builds [`FileRecord`]s for the images directly inside a directory.
pub struct DirectoryScanner {
    storage: Arc<dyn Storage>,
}

impl DirectoryScanner {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Lists `source` (non-recursive) and keeps image entries, in listing order.
    ///
    /// Entries that fail to resolve or have no image MIME type are skipped.
    pub fn scan(&self, source: &Locator) -> ConvertResult<Vec<FileRecord>> {
        let children = self.storage.list_children(source).map_err(|e| {
            ConvertError::access(format!("Cannot list {source}: {e}"))
        })?;

        let listed = children.len();
        let records: Vec<FileRecord> = children
            .into_iter()
            .filter_map(|child| match child {
                Ok(entry) => Self::to_record(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", source, e);
                    None
                }
            })
            .collect();

        info!("Scanned {}: {} images out of {} entries", source, records.len(), listed);
        Ok(records)
    }

    fn to_record(entry: ChildEntry) -> Option<FileRecord> {
        let is_image = entry
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with(IMAGE_MIME_PREFIX));

        if !is_image {
            debug!("Skipping {} ({:?})", entry.name, entry.mime_type);
            return None;
        }

        Some(FileRecord {
            size: format_file_size(entry.byte_length),
            locator: entry.locator,
            name: entry.name,
            byte_length: entry.byte_length,
            status: ProcessStatus::Idle,
        })
    }
}
