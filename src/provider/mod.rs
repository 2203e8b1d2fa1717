//! Provider module
//!
//! Talks to the upstream LLM. `ChatProvider` is the seam the relay depends
//! on; `AnthropicClient` is the HTTP implementation.

pub mod anthropic;
pub mod translate;
pub mod types;

use async_trait::async_trait;

use crate::error::RelayResult;

pub use anthropic::AnthropicClient;
pub use types::{
    ContentBlock, ConversationMessage, MessagesRequest, MessagesResponse, ProviderMessage,
    ProviderRole, Sender, Usage,
};

/// Trait defining the interface for LLM providers
///
/// Implementations send exactly one request per call and never retry.
/// The API key is passed per call so a key saved mid-session is picked up
/// on the next send.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Send a conversation and return the decoded response
    async fn create_message(
        &self,
        api_key: &str,
        request: &MessagesRequest,
    ) -> RelayResult<MessagesResponse>;
}
