//! Persisted user preferences.
//!
//! These only seed the parameters of a scan or a run; the core never consults
//! them on its own.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::DEFAULT_OUTPUT_FOLDER;
use crate::storage::Locator;
use crate::utils::{ConvertError, ConvertResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Last directory the user scanned
    pub source_directory: Option<Locator>,
    /// Output folder name offered for the next run
    pub target_folder_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_directory: None,
            target_folder_name: DEFAULT_OUTPUT_FOLDER.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConvertError::settings(format!(
                    "Failed to read {}: {e}", path.display()
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            ConvertError::settings(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConvertResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ConvertError::settings(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::settings(format!("Failed to serialize settings: {e}")))?;
        fs::write(path, json)
            .map_err(|e| ConvertError::settings(format!("Failed to write {}: {e}", path.display())))
    }
}
