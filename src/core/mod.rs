//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Entry points for a presentation layer (scan and run)
//! - [`FileRecordStore`]: Observable record set, progress and running flag
//! - [`ConversionRequest`]: Configuration for one conversion run
//! - [`FileRecord`] / [`ProcessStatus`]: One source image and its state
//! - [`ConversionProgress`]: Progress tracking for a run
//! - [`Settings`]: Persisted preferences seeding requests

mod state;
mod types;
mod store;
mod progress;
mod settings;

pub use state::AppState;
pub use types::{
    ConversionRequest, ConversionSummary, FileRecord, ProcessStatus, DEFAULT_OUTPUT_FOLDER,
    DEFAULT_QUALITY,
};
pub use store::{FileRecordStore, StoreEvent};
pub use progress::ConversionProgress;
pub use settings::Settings;
