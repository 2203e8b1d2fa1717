//! Mock Anthropic Messages API server for testing
//!
//! Provides wiremock-based mocks for:
//! - POST /v1/messages - Create a message
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::anthropic::{AnthropicTestData, MockAnthropicServer};
//!
//! #[tokio::test]
//! async fn test_with_anthropic_mock() {
//!     let mock_server = MockAnthropicServer::start().await;
//!     mock_server.mock_message_success("Hello").await;
//!
//!     // Use mock_server.base_url() as ANTHROPIC_API_URL
//! }
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the relay posts to, relative to the server root
pub const MESSAGES_PATH: &str = "/v1/messages";

/// Mock Anthropic API server wrapper
pub struct MockAnthropicServer {
    server: MockServer,
}

impl MockAnthropicServer {
    /// Start a new mock Anthropic server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure the client with (includes `/v1`)
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Get all received requests (for assertion in tests)
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    // =========================================================================
    // POST /v1/messages
    // =========================================================================

    /// Mock a successful response, matching the fixed headers and generation parameters
    pub async fn mock_message_success_for_key(&self, api_key: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .and(header("x-api-key", api_key))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "model": "claude-3-opus-20240229",
                "max_tokens": 1000,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(AnthropicTestData::text_response(text)))
            .mount(&self.server)
            .await;
    }

    /// Mock a successful response regardless of request details
    pub async fn mock_message_success(&self, text: &str) {
        self.mock_body(200, AnthropicTestData::text_response(text))
            .await;
    }

    /// Mock a response with an arbitrary JSON body
    pub async fn mock_body(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a response with a raw (possibly non-JSON) body
    pub async fn mock_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(MESSAGES_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock 500 Internal Server Error with an Anthropic-style error body
    pub async fn mock_server_error(&self) {
        self.mock_body(500, AnthropicTestData::error_body("api_error", "Internal server error"))
            .await;
    }

    /// Mock 401 Unauthorized
    pub async fn mock_unauthorized(&self) {
        self.mock_body(
            401,
            AnthropicTestData::error_body("authentication_error", "invalid x-api-key"),
        )
        .await;
    }
}

/// Canned Anthropic payloads
pub struct AnthropicTestData;

impl AnthropicTestData {
    /// Minimal success body
    pub fn text_response(text: &str) -> Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "model": "m",
            "stop_reason": "end",
            "type": "message"
        })
    }

    /// Error body in the provider's format
    pub fn error_body(error_type: &str, message: &str) -> Value {
        json!({
            "type": "error",
            "error": {"type": error_type, "message": message}
        })
    }
}
