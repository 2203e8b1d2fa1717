//! Chat history module
//!
//! Records conversation turns with an external backend. The relay only ever
//! calls `save_message`; what the backend does with it is its own business.

pub mod client;
pub mod memory;

use async_trait::async_trait;

use crate::error::PersistenceError;

pub use client::ChatApiClient;
pub use memory::{InMemoryHistory, SavedMessage};

/// Persistence collaborator for conversation turns
#[async_trait]
pub trait ChatHistory: Send + Sync {
    /// Store one message of the chat identified by `chat_id`
    async fn save_message(
        &self,
        content: &str,
        is_user_message: bool,
        chat_id: &str,
    ) -> Result<(), PersistenceError>;

    /// Whether saved messages outlive the process
    fn is_durable(&self) -> bool {
        true
    }
}
