//! Error types for the image converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;
use serde::Serialize;

/// Storage access errors raised by [`crate::storage::Storage`] implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StorageError {
    /// Locator does not resolve to anything
    #[error("Not found: {0}")]
    NotFound(String),
    /// Locator resolves to something that is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    /// Underlying IO failure
    #[error("IO error: {0}")]
    Io(String),
}

/// Main error type for the converter.
///
/// Per-file variants (`Access`, `Decode`, `Encode`, `Write`) end up inside a
/// record's status; the others are returned to the caller of a scan or run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ConvertError {
    /// Source could not be opened or read
    #[error("Access error: {0}")]
    Access(String),

    /// Source bytes are not a recognized image encoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// Target format unsupported or encoder failure
    #[error("Encode error: {0}")]
    Encode(String),

    /// Destination could not be created or written
    #[error("Write error: {0}")]
    Write(String),

    /// Output folder could not be resolved or created
    #[error("Output directory error: {0}")]
    OutputDir(String),

    /// Request rejected before any file was touched
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Another scan or run holds the record store
    #[error("Busy: {0}")]
    Busy(String),

    /// Settings file could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),

    /// Background worker died before reporting back
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Helper methods for error creation
impl ConvertError {
    pub fn access<T: Into<String>>(msg: T) -> Self {
        Self::Access(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn write<T: Into<String>>(msg: T) -> Self {
        Self::Write(msg.into())
    }

    pub fn output_dir<T: Into<String>>(msg: T) -> Self {
        Self::OutputDir(msg.into())
    }

    pub fn invalid_request<T: Into<String>>(msg: T) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn busy<T: Into<String>>(msg: T) -> Self {
        Self::Busy(msg.into())
    }

    pub fn settings<T: Into<String>>(msg: T) -> Self {
        Self::Settings(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }
}

impl From<tokio::task::JoinError> for ConvertError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Worker(format!("Task panicked: {err}"))
    }
}

// Convert io::Error to StorageError
impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
