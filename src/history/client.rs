//! Chat API client
//!
//! HTTP client for the backend that stores chat history.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::ChatHistory;
use crate::error::PersistenceError;

/// Request body for saving a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMessageRequest {
    pub content: String,
    pub is_user_message: bool,
}

/// Chat API client
pub struct ChatApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ChatApiClient {
    /// Create a new chat API client
    pub fn new(client: reqwest::Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// `{base}/chats/{chat_id}/messages`, with `chat_id` encoded as a single segment
    fn message_url(&self, chat_id: &str) -> Result<Url, PersistenceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PersistenceError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| PersistenceError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("chats")
            .push(chat_id)
            .push("messages");
        Ok(url)
    }
}

#[async_trait]
impl ChatHistory for ChatApiClient {
    #[instrument(skip(self, content))]
    async fn save_message(
        &self,
        content: &str,
        is_user_message: bool,
        chat_id: &str,
    ) -> Result<(), PersistenceError> {
        let url = self.message_url(chat_id)?;

        let request = SaveMessageRequest {
            content: content.to_string(),
            is_user_message,
        };

        debug!(url = %url, "Saving message via chat API");

        let mut builder = self.client.post(url).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        let status = response.status();
        debug!(status = %status, "Chat API save response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Chat API save request failed");
            return Err(PersistenceError::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Message saved");
        Ok(())
    }
}
