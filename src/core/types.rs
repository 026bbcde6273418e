//! Core types for conversion requests, records and results.

use serde::{Deserialize, Serialize};
use crate::storage::Locator;
use crate::utils::{ConvertError, TargetFormat};

/// Default name of the folder created next to the source images.
pub const DEFAULT_OUTPUT_FOLDER: &str = "outputs";

/// Default quality when the caller does not pick one.
pub const DEFAULT_QUALITY: u8 = 100;

fn default_output_folder() -> String {
    DEFAULT_OUTPUT_FOLDER.to_string()
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

/// Configuration for one conversion run.
///
/// Immutable once a run starts; the pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Directory holding the source images
    pub source: Locator,
    /// Subfolder of `source` receiving converted files
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    /// Encoder for the converted files
    pub format: TargetFormat,
    /// 0-100, only meaningful for lossy encoders
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Target width in pixels, 0 disables resizing
    #[serde(default)]
    pub width: u32,
    /// Target height in pixels, 0 disables resizing
    #[serde(default)]
    pub height: u32,
}

impl ConversionRequest {
    pub fn new(source: impl Into<Locator>, format: TargetFormat) -> Self {
        Self {
            source: source.into(),
            output_folder: default_output_folder(),
            format,
            quality: DEFAULT_QUALITY,
            width: 0,
            height: 0,
        }
    }

    pub fn with_output_folder(mut self, name: impl Into<String>) -> Self {
        self.output_folder = name.into();
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Target dimensions, present only when both are positive.
    ///
    /// A single zero (e.g. `0x50`) means no resize at all.
    pub fn resize_target(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }
}

/// Processing status of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "cause", rename_all = "camelCase")]
pub enum ProcessStatus {
    #[default]
    Idle,
    Processing,
    Done,
    Error(ConvertError),
}

impl ProcessStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }
}

/// In-memory descriptor of one source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub locator: Locator,
    pub name: String,
    /// Human readable size, e.g. `1.5 KiB`
    pub size: String,
    pub byte_length: u64,
    pub status: ProcessStatus,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Folder the converted files were written to
    pub output_dir: Locator,
}
