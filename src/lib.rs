//! Message Relay - forwards chat conversations to the Anthropic Messages API
//!
//! The relay maps an application conversation to the provider format, sends
//! it, unwraps the reply, and records the exchanged turn with a chat history
//! backend on a best-effort basis.

pub mod config;
pub mod credential;
pub mod error;
pub mod history;
pub mod provider;
pub mod relay;

pub use crate::config::Config;
pub use crate::credential::{
    CredentialStore, FileCredentialStore, InMemoryCredentialStore, CREDENTIAL_KEY,
};
pub use crate::error::{CredentialError, PersistenceError, RelayError, RelayResult};
pub use crate::history::{ChatApiClient, ChatHistory, InMemoryHistory, SavedMessage};
pub use crate::provider::{AnthropicClient, ChatProvider, ConversationMessage, Sender};
pub use crate::relay::{MessageRelay, PersistOutcome};
