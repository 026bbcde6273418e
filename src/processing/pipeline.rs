//! Sequential conversion of a scanned record set.
//!
//! Files are processed one at a time in snapshot order. A failure is recorded
//! in that file's status and the loop moves on; only a missing output folder
//! stops the run, and that happens before any file is touched.

use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::{
    ConversionProgress, ConversionRequest, ConversionSummary, FileRecord, FileRecordStore,
    ProcessStatus,
};
use crate::storage::{Locator, Storage};
use crate::utils::{ConvertError, ConvertResult, validate_request};

use super::transform::{encode_image, transform};

/// Drives one conversion run over the records held in a [`FileRecordStore`].
pub struct ConversionPipeline {
    storage: Arc<dyn Storage>,
    store: Arc<FileRecordStore>,
}

impl ConversionPipeline {
    pub fn new(storage: Arc<dyn Storage>, store: Arc<FileRecordStore>) -> Self {
        Self { storage, store }
    }

    /// Converts every record present when the run starts.
    ///
    /// Blocks until the last file is done. Per-file failures end up in the
    /// records; the returned error is reserved for problems that prevent the
    /// run from starting at all.
    pub fn run(&self, request: &ConversionRequest) -> ConvertResult<ConversionSummary> {
        validate_request(request)?;
        let _guard = self.store.begin_run()?;

        self.store.reset_statuses();
        let snapshot = self.store.records();
        let total = snapshot.len();

        let output_dir = self.resolve_output_dir(request)?;
        info!(
            "Converting {} files from {} to {} ({}, quality {})",
            total, request.source, output_dir, request.format, request.quality
        );

        let mut succeeded = 0;
        for (idx, record) in snapshot.iter().enumerate() {
            self.store.set_status(idx, ProcessStatus::Processing);

            match self.convert_file(request, record, &output_dir) {
                Ok(()) => {
                    debug!("{} converted", record.name);
                    succeeded += 1;
                    self.store.set_status(idx, ProcessStatus::Done);
                }
                Err(e) => {
                    warn!("Conversion failed for {}: {}", record.name, e);
                    self.store.set_status(idx, ProcessStatus::Error(e));
                }
            }

            self.store.set_progress(ConversionProgress::new(idx + 1, total));
        }

        let failed = total - succeeded;
        if failed > 0 {
            warn!("Run completed with {} failed files out of {}", failed, total);
        } else {
            info!("Run completed successfully: {} files converted", total);
        }

        Ok(ConversionSummary {
            total,
            succeeded,
            failed,
            output_dir,
        })
    }

    /// Finds or creates the output folder inside the source directory.
    fn resolve_output_dir(&self, request: &ConversionRequest) -> ConvertResult<Locator> {
        let name = &request.output_folder;
        let existing = self.storage.find_child(&request.source, name).map_err(|e| {
            ConvertError::output_dir(format!("Cannot look up '{name}' in {}: {e}", request.source))
        })?;

        match existing {
            Some(entry) if entry.is_directory() => Ok(entry.locator),
            Some(entry) => Err(ConvertError::output_dir(format!(
                "{} exists and is not a directory", entry.locator
            ))),
            None => self.storage.create_directory(&request.source, name).map_err(|e| {
                ConvertError::output_dir(format!("Cannot create '{name}' in {}: {e}", request.source))
            }),
        }
    }

    fn convert_file(
        &self,
        request: &ConversionRequest,
        record: &FileRecord,
        output_dir: &Locator,
    ) -> ConvertResult<()> {
        let source_bytes = self.read_source(&record.locator)?;
        let output_name = output_file_name(&record.name, &request.format.extension());

        if let Some(existing) = self.storage.find_child(output_dir, &output_name)
            .map_err(|e| ConvertError::write(format!("Cannot look up {output_name}: {e}")))?
        {
            debug!("Replacing existing {}", existing.locator);
            self.storage.delete(&existing.locator).map_err(|e| {
                ConvertError::write(format!("Cannot delete {}: {e}", existing.locator))
            })?;
        }

        // Encode fully in memory so decode/encode failures leave nothing behind
        let (width, height) = request.resize_target().unwrap_or((0, 0));
        let raster = transform(&source_bytes, width, height)?;
        let encoded = encode_image(&raster, request.format, request.quality)?;

        let target = self
            .storage
            .create_file(output_dir, &request.format.mime_type(), &output_name)
            .map_err(|e| ConvertError::write(format!("Cannot create {output_name}: {e}")))?;

        let mut sink = self.storage.open_write(&target)
            .map_err(|e| ConvertError::write(format!("Cannot open {target}: {e}")))?;
        sink.write_all(&encoded)
            .and_then(|_| sink.flush())
            .map_err(|e| ConvertError::write(format!("Cannot write {target}: {e}")))?;

        debug!(
            "'{}' → '{}' ({} → {} bytes)",
            record.name, output_name, source_bytes.len(), encoded.len()
        );
        Ok(())
    }

    fn read_source(&self, locator: &Locator) -> ConvertResult<Vec<u8>> {
        let mut reader = self.storage.open_read(locator)
            .map_err(|e| ConvertError::access(format!("Cannot open {locator}: {e}")))?;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)
            .map_err(|e| ConvertError::access(format!("Cannot read {locator}: {e}")))?;
        Ok(bytes)
    }
}

/// Replaces the extension of `name` (text after the last `.`) with `extension`.
pub fn output_file_name(name: &str, extension: &str) -> String {
    let stem = match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    };
    format!("{stem}.{extension}")
}
