//! Anthropic Messages API client
//!
//! One POST per call, no retries. Non-2xx responses are logged once with
//! whatever diagnostic body the provider sent.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::types::{MessagesRequest, MessagesResponse};
use super::ChatProvider;
use crate::{
    config::Config,
    error::{RelayError, RelayResult},
};

/// API version sent with every request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client
pub struct AnthropicClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.anthropic_api_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

#[async_trait]
impl ChatProvider for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    #[instrument(skip(self, api_key, request), fields(model = %request.model, messages = request.messages.len()))]
    async fn create_message(
        &self,
        api_key: &str,
        request: &MessagesRequest,
    ) -> RelayResult<MessagesResponse> {
        let url = self.messages_url();
        debug!(url = %url, "Sending request to Anthropic");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Anthropic response status");

        if !status.is_success() {
            // Diagnostic only: an unreadable or non-JSON body does not change the error
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<Value>(&text) {
                Ok(body) => error!(status = %status, body = %body, "Claude API error"),
                Err(_) => error!(status = %status, raw_body = %text, "Claude API error (non-JSON body)"),
            }
            return Err(RelayError::ProviderHttp {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, body = %body, "Failed to decode Anthropic response");
            RelayError::MalformedResponse(format!("undecodable body: {}", e))
        })?;

        debug!(
            model = ?parsed.model,
            stop_reason = ?parsed.stop_reason,
            input_tokens = parsed.usage.as_ref().map(|u| u.input_tokens),
            output_tokens = parsed.usage.as_ref().map(|u| u.output_tokens),
            "Anthropic response decoded"
        );
        Ok(parsed)
    }
}
