//! Error types for the relay
//!
//! Main-path failures are `RelayError`. Failures of the persistence
//! collaborator and the credential store have their own types so they can
//! never be confused with (or silently turned into) a failed send.

use thiserror::Error;

/// Errors surfaced by `MessageRelay::send`
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Claude API key not found")]
    MissingCredential,

    #[error("Claude API error: {status}")]
    ProviderHttp { status: u16 },

    #[error("Invalid response format from Claude API: {0}")]
    MalformedResponse(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    /// Whether the user can fix this by supplying a credential
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, RelayError::MissingCredential)
    }
}

/// Errors raised by a `ChatHistory` backend
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Chat API error {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Chat API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Message rejected: {0}")]
    Rejected(String),

    #[error("Invalid chat API URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised while writing a credential
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type RelayResult<T> = Result<T, RelayError>;
