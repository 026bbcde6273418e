//! The conversion engine: scanning, transforming and the run loop.
//!
//! - [`DirectoryScanner`]: turns a source directory into records.
//! - [`transform`]: decode, resize and encode a single image.
//! - [`ConversionPipeline`]: processes the records one file at a time.

mod pipeline;
mod scanner;
pub mod transform;

pub use pipeline::{ConversionPipeline, output_file_name};
pub use scanner::DirectoryScanner;
