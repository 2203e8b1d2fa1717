//! In-memory credential store
//!
//! Process-local slot, used when the key comes from the environment and in
//! tests.

use std::sync::RwLock;

use super::CredentialStore;
use crate::error::CredentialError;

/// Credential held in memory for the lifetime of the process
///
/// Concurrent saves are last-write-wins.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    key: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `key`
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(key.into())),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> String {
        match self.key.read() {
            Ok(guard) => guard.clone().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().clone().unwrap_or_default(),
        }
    }

    fn save(&self, key: &str) -> Result<(), CredentialError> {
        let mut guard = match self.key.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(key.to_string());
        Ok(())
    }
}
