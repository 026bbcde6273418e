//! Locator-based access to the directories being converted.
//!
//! The core never touches raw paths. It talks to a [`Storage`] through opaque
//! [`Locator`]s so that hosts with their own document APIs can plug in.
//!
//! - [`LocalStorage`]: `std::fs` backed implementation, locators are paths.

mod local;

use std::fmt;
use std::io::{Read, Write};
use serde::{Deserialize, Serialize};
use crate::utils::StorageResult;

pub use local::LocalStorage;

/// Opaque handle identifying a file or directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One child as reported by [`Storage::list_children`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildEntry {
    pub locator: Locator,
    pub name: String,
    pub kind: EntryKind,
    /// Resolved content type, `None` when it cannot be determined
    pub mime_type: Option<String>,
    pub byte_length: u64,
}

impl ChildEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Directory/file abstraction consumed by the scanner and the pipeline.
pub trait Storage: Send + Sync {
    /// Resolves `locator` itself, failing when it does not exist.
    fn stat(&self, locator: &Locator) -> StorageResult<ChildEntry>;

    /// Lists direct children in the order the host reports them.
    ///
    /// The outer error means the directory itself is unusable; inner errors
    /// are per-entry and may be skipped by the caller.
    fn list_children(&self, locator: &Locator) -> StorageResult<Vec<StorageResult<ChildEntry>>>;

    fn find_child(&self, parent: &Locator, name: &str) -> StorageResult<Option<ChildEntry>>;

    fn open_read(&self, locator: &Locator) -> StorageResult<Box<dyn Read + Send>>;

    fn open_write(&self, locator: &Locator) -> StorageResult<Box<dyn Write + Send>>;

    /// Creates an empty file named `name` inside `parent`.
    fn create_file(&self, parent: &Locator, mime_type: &str, name: &str) -> StorageResult<Locator>;

    fn create_directory(&self, parent: &Locator, name: &str) -> StorageResult<Locator>;

    fn delete(&self, locator: &Locator) -> StorageResult<()>;
}
