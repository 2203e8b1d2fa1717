//! File-backed credential store
//!
//! Keeps the key in a small JSON object on disk so it survives restarts:
//!
//! ```json
//! { "claude_api_key": "sk-ant-..." }
//! ```
//!
//! Other keys already present in the file are preserved on save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CredentialStore, CREDENTIAL_KEY};
use crate::error::CredentialError;

/// Credential persisted as a JSON file
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store backed by `path`; the file need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, CredentialError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> String {
        match self.read_entries() {
            Ok(entries) => entries
                .get(CREDENTIAL_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read credential file");
                String::new()
            }
        }
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        // A corrupt file is replaced rather than blocking the save
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(CREDENTIAL_KEY.to_string(), Value::String(key.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&Value::Object(entries))?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Saved credential");
        Ok(())
    }
}
