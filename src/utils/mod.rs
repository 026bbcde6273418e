pub mod error;
pub mod validation;
pub mod formats;
pub mod size;

pub use error::{ConvertError, ConvertResult, StorageError, StorageResult};
pub use validation::validate_request;
pub use formats::TargetFormat;
pub use size::format_file_size;
