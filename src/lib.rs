// Module declarations in dependency order
pub mod utils;
pub mod storage;
pub mod core;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{
    AppState, ConversionProgress, ConversionRequest, ConversionSummary, FileRecord,
    FileRecordStore, ProcessStatus, Settings, StoreEvent,
};
pub use storage::{LocalStorage, Locator, Storage};
pub use utils::{ConvertError, ConvertResult, TargetFormat, format_file_size};
pub use commands::*;

// This library file is the public API for embedding the converter.
// The command line entry point is in main.rs.
