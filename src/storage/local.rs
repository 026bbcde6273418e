use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::{StorageError, StorageResult};
use super::{ChildEntry, EntryKind, Locator, Storage};

/// [`Storage`] over the local filesystem. Locators are plain paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn path(locator: &Locator) -> &Path {
        Path::new(locator.as_str())
    }

    fn locator(path: PathBuf) -> Locator {
        Locator::new(path.to_string_lossy().to_string())
    }

    fn describe(path: &Path) -> StorageResult<ChildEntry> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            _ => StorageError::from(e),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (kind, mime_type) = if metadata.is_dir() {
            (EntryKind::Directory, None)
        } else {
            let mime = mime_guess::from_path(path).first().map(|m| m.essence_str().to_string());
            (EntryKind::File, mime)
        };

        Ok(ChildEntry {
            locator: Self::locator(path.to_path_buf()),
            name,
            kind,
            mime_type,
            byte_length: if metadata.is_dir() { 0 } else { metadata.len() },
        })
    }

    fn require_directory(locator: &Locator) -> StorageResult<&Path> {
        let path = Self::path(locator);
        let entry = Self::describe(path)?;
        if !entry.is_directory() {
            return Err(StorageError::NotADirectory(locator.to_string()));
        }
        Ok(path)
    }
}

impl Storage for LocalStorage {
    fn stat(&self, locator: &Locator) -> StorageResult<ChildEntry> {
        Self::describe(Self::path(locator))
    }

    fn list_children(&self, locator: &Locator) -> StorageResult<Vec<StorageResult<ChildEntry>>> {
        let dir = Self::require_directory(locator)?;
        let entries = fs::read_dir(dir)?
            .map(|entry| {
                let entry = entry?;
                Self::describe(&entry.path())
            })
            .collect();
        Ok(entries)
    }

    fn find_child(&self, parent: &Locator, name: &str) -> StorageResult<Option<ChildEntry>> {
        let dir = Self::require_directory(parent)?;
        match Self::describe(&dir.join(name)) {
            Ok(entry) => Ok(Some(entry)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn open_read(&self, locator: &Locator) -> StorageResult<Box<dyn Read + Send>> {
        let file = fs::File::open(Self::path(locator))?;
        Ok(Box::new(file))
    }

    fn open_write(&self, locator: &Locator) -> StorageResult<Box<dyn Write + Send>> {
        let file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(Self::path(locator))?;
        Ok(Box::new(file))
    }

    fn create_file(&self, parent: &Locator, mime_type: &str, name: &str) -> StorageResult<Locator> {
        let dir = Self::require_directory(parent)?;
        let path = dir.join(name);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        debug!("Created {} ({})", path.display(), mime_type);
        Ok(Self::locator(path))
    }

    fn create_directory(&self, parent: &Locator, name: &str) -> StorageResult<Locator> {
        let dir = Self::require_directory(parent)?;
        let path = dir.join(name);
        fs::create_dir(&path)?;
        Ok(Self::locator(path))
    }

    fn delete(&self, locator: &Locator) -> StorageResult<()> {
        let path = Self::path(locator);
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
