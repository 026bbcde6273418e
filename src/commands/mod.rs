//! Async entry points for a presentation layer.
//!
//! The core is blocking; these commands move it onto Tokio's blocking pool so
//! the caller's thread stays responsive:
//! - [`scan_directory`]: Replace the records with the images in a directory
//! - [`convert_images`]: Convert the current records
//! - [`watch_progress`]: Follow progress updates until a run ends

mod convert;

pub use convert::*;
