//! Mock chat history backend for testing
//!
//! Provides wiremock-based mocks for:
//! - POST /chats/{chat_id}/messages - Save a message

use serde_json::Value;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

const SAVE_MESSAGE_PATH: &str = r"^/chats/[^/]+/messages$";

/// A save request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRequest {
    pub path: String,
    pub content: String,
    pub is_user_message: bool,
    pub authorization: Option<String>,
}

/// Mock chat API server wrapper
pub struct MockChatApiServer {
    server: MockServer,
}

impl MockChatApiServer {
    /// Start a new mock chat API server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock successful saves
    pub async fn mock_save_success(&self) {
        Mock::given(method("POST"))
            .and(path_regex(SAVE_MESSAGE_PATH))
            .respond_with(ResponseTemplate::new(201))
            .mount(&self.server)
            .await;
    }

    /// Mock failing saves
    pub async fn mock_save_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(SAVE_MESSAGE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("storage unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Decoded save requests in arrival order
    pub async fn saved_requests(&self) -> Vec<SavedRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                let body: Value = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
                SavedRequest {
                    path: r.url.path().to_string(),
                    content: body["content"].as_str().unwrap_or_default().to_string(),
                    is_user_message: body["isUserMessage"].as_bool().unwrap_or_default(),
                    authorization: r
                        .headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(|s| s.to_string()),
                }
            })
            .collect()
    }
}
