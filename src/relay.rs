//! Message relay
//!
//! Forwards a conversation to the provider and records the exchanged turn.
//! The provider call is the main path: its failures are logged once and
//! returned unchanged. Recording is a separate sub-operation whose result
//! `send` inspects only to log it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::Config,
    credential::{CredentialStore, FileCredentialStore, InMemoryCredentialStore},
    error::{PersistenceError, RelayError, RelayResult},
    history::{ChatApiClient, ChatHistory, InMemoryHistory},
    provider::{
        translate::{build_request, extract_reply},
        AnthropicClient, ChatProvider, ConversationMessage, Sender,
    },
};

/// What the persistence step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// User message and reply were both saved
    Saved,
    /// The conversation had no user message, nothing was saved
    NoUserMessage,
}

/// Relay between a caller's conversation and the provider
pub struct MessageRelay {
    provider: Arc<dyn ChatProvider>,
    credentials: Arc<dyn CredentialStore>,
    history: Arc<dyn ChatHistory>,
}

impl MessageRelay {
    /// Create a relay from explicit collaborators
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        credentials: Arc<dyn CredentialStore>,
        history: Arc<dyn ChatHistory>,
    ) -> Self {
        Self {
            provider,
            credentials,
            history,
        }
    }

    /// Create a relay wired from configuration
    ///
    /// A key in the environment takes precedence over the credential file.
    /// Without a chat API URL, turns are kept in memory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let provider: Arc<dyn ChatProvider> =
            Arc::new(AnthropicClient::new(http_client.clone(), config));

        let credentials: Arc<dyn CredentialStore> = match &config.anthropic_api_key {
            Some(key) => Arc::new(InMemoryCredentialStore::with_key(key.clone())),
            None => Arc::new(FileCredentialStore::new(config.credential_file.clone())),
        };

        let history: Arc<dyn ChatHistory> = match &config.chat_api_url {
            Some(url) => Arc::new(ChatApiClient::new(
                http_client,
                url,
                config.chat_api_token.clone(),
            )),
            None => {
                info!("CHAT_API_URL not set, keeping chat history in memory");
                Arc::new(InMemoryHistory::new())
            }
        };

        Ok(Self::new(provider, credentials, history))
    }

    /// Credential store the relay reads from
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Send a conversation and return the reply text
    ///
    /// When both `user_id` and `chat_id` are non-empty, the last user
    /// message and the reply are recorded afterwards. A recording failure
    /// is logged and never affects the returned reply.
    #[instrument(skip(self, messages), fields(messages = messages.len(), provider = self.provider.name()))]
    pub async fn send(
        &self,
        messages: &[ConversationMessage],
        user_id: Option<&str>,
        chat_id: Option<&str>,
    ) -> RelayResult<String> {
        let reply = self.request_reply(messages).await.map_err(|e| {
            error!(error = %e, "Error calling Claude API");
            e
        })?;

        let user_id = user_id.filter(|s| !s.is_empty());
        let chat_id = chat_id.filter(|s| !s.is_empty());

        if let (Some(user_id), Some(chat_id)) = (user_id, chat_id) {
            if !self.history.is_durable() {
                warn!(
                    chat_id = %chat_id,
                    "No chat API configured, this turn is kept in memory only and lost on exit"
                );
            }
            match self.persist_turn(messages, &reply, chat_id).await {
                Ok(PersistOutcome::Saved) => {
                    debug!(user_id = %user_id, chat_id = %chat_id, "Conversation turn saved")
                }
                Ok(PersistOutcome::NoUserMessage) => {
                    debug!(chat_id = %chat_id, "No user message to save")
                }
                Err(e) => {
                    warn!(chat_id = %chat_id, error = %e, "Failed to save chat history to backend")
                }
            }
        }

        Ok(reply)
    }

    /// Record the last user message and the reply, in that order
    ///
    /// Stops at the first failure, so the reply is never saved without the
    /// user message before it.
    pub async fn persist_turn(
        &self,
        messages: &[ConversationMessage],
        reply: &str,
        chat_id: &str,
    ) -> Result<PersistOutcome, PersistenceError> {
        let Some(last_user) = messages.iter().rev().find(|m| m.sender == Sender::User) else {
            return Ok(PersistOutcome::NoUserMessage);
        };

        self.history
            .save_message(&last_user.content, true, chat_id)
            .await?;
        self.history.save_message(reply, false, chat_id).await?;

        Ok(PersistOutcome::Saved)
    }

    async fn request_reply(&self, messages: &[ConversationMessage]) -> RelayResult<String> {
        let api_key = self.credentials.get();
        if api_key.is_empty() {
            return Err(RelayError::MissingCredential);
        }

        let request = build_request(messages);
        let response = self.provider.create_message(&api_key, &request).await?;
        extract_reply(&response)
    }
}
