//! Common test utilities for the relay
//!
//! Shared harness wiring a real `MessageRelay` to mock servers, plus a
//! tracing layer that captures emitted events.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use message_relay::{
    AnthropicClient, ChatApiClient, Config, InMemoryCredentialStore, MessageRelay,
};

use crate::mocks::{MockAnthropicServer, MockChatApiServer};

/// Test configuration constants
pub mod constants {
    /// API key stored in the harness credential store
    pub const TEST_API_KEY: &str = "sk-ant-test-key";
    /// Bearer token for the chat API
    pub const TEST_CHAT_TOKEN: &str = "test-chat-token";
    /// Test user ID
    pub const TEST_USER_ID: &str = "user_123";
    /// Test chat ID
    pub const TEST_CHAT_ID: &str = "chat_456";
}

/// Relay wired to a mock provider and a mock chat backend
pub struct RelayTestHarness {
    pub anthropic: MockAnthropicServer,
    pub chat_api: MockChatApiServer,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub relay: MessageRelay,
}

impl RelayTestHarness {
    /// Harness with `TEST_API_KEY` already stored
    pub async fn new() -> Self {
        Self::build(InMemoryCredentialStore::with_key(constants::TEST_API_KEY)).await
    }

    /// Harness with an empty credential store
    pub async fn without_credential() -> Self {
        Self::build(InMemoryCredentialStore::new()).await
    }

    async fn build(credentials: InMemoryCredentialStore) -> Self {
        let anthropic = MockAnthropicServer::start().await;
        let chat_api = MockChatApiServer::start().await;

        let config = Config::with_endpoints(&anthropic.base_url(), Some(&chat_api.uri()));
        let http_client = reqwest::Client::new();

        let credentials = Arc::new(credentials);
        let relay = MessageRelay::new(
            Arc::new(AnthropicClient::new(http_client.clone(), &config)),
            credentials.clone(),
            Arc::new(ChatApiClient::new(
                http_client,
                &chat_api.uri(),
                Some(constants::TEST_CHAT_TOKEN.to_string()),
            )),
        );

        Self {
            anthropic,
            chat_api,
            credentials,
            relay,
        }
    }
}

/// Captured tracing event
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
}

/// Layer recording level and target of every event
#[derive(Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Install as the thread-local default subscriber until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    /// Number of events at `level` whose target starts with `target`
    pub fn count(&self, level: Level, target: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.level == level && e.target.starts_with(target))
            .count()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
        });
    }
}
