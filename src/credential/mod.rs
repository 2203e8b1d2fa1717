//! Credential module
//!
//! Stores the provider API key under a fixed name. The relay reads it on
//! every send; nothing here validates or rotates it.

pub mod file;
pub mod memory;

pub use self::file::FileCredentialStore;
pub use self::memory::InMemoryCredentialStore;

use crate::error::CredentialError;

/// Name the API key is stored under
pub const CREDENTIAL_KEY: &str = "claude_api_key";

/// Key-value slot holding the provider credential
///
/// `get` never fails: an absent key reads as the empty string, and deciding
/// what to do about that is left to the caller.
pub trait CredentialStore: Send + Sync {
    /// Current token, or `""` when nothing is stored
    fn get(&self) -> String;

    /// Overwrite the stored token
    fn save(&self, key: &str) -> Result<(), CredentialError>;

    /// True iff a non-empty token is stored
    fn exists(&self) -> bool {
        !self.get().is_empty()
    }
}
